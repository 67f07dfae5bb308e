//! # AppError
//!
//! Centralized error handling for the OpsDesk ecosystem.
//!
//! Two classes matter to callers: `NotFound` raised by the ticket mutators
//! (status/priority/comment against an unknown id) aborts the operation
//! with no partial effects, while plain lookups report absence as data
//! (`Option`) and never construct an error at all.

use thiserror::Error;

/// The primary error type for all od-core operations.
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found (e.g., Ticket, HelpTopic)
    #[error("{0} not found with id {1}")]
    NotFound(&'static str, u64),

    /// Malformed input the store cannot accept (e.g., unreadable upload)
    #[error("validation error: {0}")]
    Validation(String),

    /// Admin-gate rejection. Non-authoritative: a UI convenience only.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Infrastructure failure (e.g., blob store I/O)
    #[error("internal service error: {0}")]
    Internal(String),
}

/// A specialized Result type for OpsDesk logic.
pub type Result<T> = std::result::Result<T, AppError>;

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}
