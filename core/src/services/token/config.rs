//! Configuration for the token service

use jsonwebtoken::Algorithm;

use crate::domain::entities::token::{
    ACTION_TOKEN_EXPIRY_MINUTES, JWT_ISSUER, SESSION_TOKEN_EXPIRY_MINUTES,
};

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// JWT signing secret
    pub secret: String,
    /// JWT signing algorithm
    pub algorithm: Algorithm,
    /// Issuer claim stamped into and required from every token
    pub issuer: String,
    /// Session token expiry in minutes
    pub session_ttl_minutes: i64,
    /// Action token (verification/reset) expiry in minutes
    pub action_ttl_minutes: i64,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            secret: "development-secret-please-change-in-production".to_string(),
            algorithm: Algorithm::HS256,
            issuer: JWT_ISSUER.to_string(),
            session_ttl_minutes: SESSION_TOKEN_EXPIRY_MINUTES,
            action_ttl_minutes: ACTION_TOKEN_EXPIRY_MINUTES,
        }
    }
}

impl TokenServiceConfig {
    /// Create a config with an explicit secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Set the session token TTL in minutes
    pub fn with_session_ttl_minutes(mut self, minutes: i64) -> Self {
        self.session_ttl_minutes = minutes;
        self
    }

    /// Parse an algorithm name as configured in the environment
    /// (`HS256`, `HS384`, `HS512`); anything unknown falls back to HS256
    pub fn with_algorithm_name(mut self, name: &str) -> Self {
        self.algorithm = match name {
            "HS384" => Algorithm::HS384,
            "HS512" => Algorithm::HS512,
            _ => Algorithm::HS256,
        };
        self
    }
}
