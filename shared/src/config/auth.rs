//! JWT signing configuration

use serde::{Deserialize, Serialize};

/// JWT signing configuration
///
/// The secret must be provided through `JWT_SECRET_KEY` in any real
/// deployment; the compiled-in default exists only so local development
/// and tests can run without a dotenv file.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// JWT secret key for signing tokens
    pub secret: String,

    /// Algorithm for JWT signing (default: HS256)
    pub algorithm: String,

    /// Session token expiry time in minutes
    pub access_token_expiry_minutes: i64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from("development-secret-please-change-in-production"),
            algorithm: String::from("HS256"),
            access_token_expiry_minutes: 60,
        }
    }
}

impl JwtConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            secret: std::env::var("JWT_SECRET_KEY").unwrap_or(defaults.secret),
            algorithm: std::env::var("JWT_ALGORITHM").unwrap_or(defaults.algorithm),
            access_token_expiry_minutes: std::env::var("JWT_ACCESS_TOKEN_EXPIRE_MINUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.access_token_expiry_minutes),
        }
    }

    /// Check if the compiled-in development secret is still in use
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == "development-secret-please-change-in-production"
    }
}
