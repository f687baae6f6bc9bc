//! Configuration for the identity workflow engine

use crate::domain::entities::token::ACTION_TOKEN_EXPIRY_MINUTES;

/// Configuration for the identity workflow engine
#[derive(Debug, Clone)]
pub struct IdentityServiceConfig {
    /// Lifetime of the stored password-reset window in minutes
    ///
    /// This is the store-side bound (`reset_password_expires_at`); the
    /// signed token carries its own matching expiry.
    pub reset_token_ttl_minutes: i64,
}

impl Default for IdentityServiceConfig {
    fn default() -> Self {
        Self {
            reset_token_ttl_minutes: ACTION_TOKEN_EXPIRY_MINUTES,
        }
    }
}
