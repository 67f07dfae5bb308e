//! # od-auth-simple
//!
//! Argon2-based implementation of `AdminGate`.
//!
//! Non-authoritative on purpose: every store operation is callable without
//! passing this check. The gate only tells the UI whether to show the admin
//! affordances, matching the session-password convenience it replaces.

use argon2::{
    password_hash::{PasswordHash, PasswordVerifier},
    Argon2,
};
use async_trait::async_trait;
use od_core::traits::AdminGate;

pub struct SimpleAdminGate {
    /// PHC-format Argon2 hash of the admin password, from the environment.
    admin_hash: String,
}

impl SimpleAdminGate {
    pub fn new(admin_hash: &str) -> Self {
        Self {
            admin_hash: admin_hash.to_string(),
        }
    }
}

#[async_trait]
impl AdminGate for SimpleAdminGate {
    /// Verifies a candidate password against the stored Argon2 hash.
    async fn verify_admin_password(&self, password: &str) -> bool {
        let parsed_hash = match PasswordHash::new(&self.admin_hash) {
            Ok(p) => p,
            Err(err) => {
                log::warn!("admin hash unparsable, gate stays closed: {}", err);
                return false;
            }
        };
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }
}
