//! opsdesk/crates/od-core/src/lib.rs
//!
//! The central domain logic and interface definitions for OpsDesk.

pub mod clock;
pub mod error;
pub mod models;
pub mod period;
pub mod traits;

// Re-exporting for easier access in other crates
pub use clock::*;
pub use error::*;
pub use models::*;
pub use traits::*;
