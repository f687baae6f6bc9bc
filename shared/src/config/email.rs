//! SMTP transport and sender configuration

use serde::{Deserialize, Serialize};

/// Outbound email configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmailConfig {
    /// Mail provider selector: "smtp" for real delivery, "mock" to log
    /// messages instead of sending them
    pub provider: String,

    /// SMTP server hostname
    pub smtp_host: String,

    /// SMTP server port
    pub smtp_port: u16,

    /// SMTP username; also surfaces as the support address in templates
    pub username: String,

    /// SMTP password or app-specific password
    pub password: String,

    /// From address placed on outbound messages
    pub from_address: String,

    /// Use implicit TLS (SMTPS) instead of STARTTLS
    pub use_ssl: bool,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            provider: String::from("mock"),
            smtp_host: String::from("localhost"),
            smtp_port: 587,
            username: String::new(),
            password: String::new(),
            from_address: String::from("no-reply@localhost"),
            use_ssl: false,
        }
    }
}

impl EmailConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            provider: std::env::var("EMAIL_PROVIDER").unwrap_or(defaults.provider),
            smtp_host: std::env::var("SMTP_SERVER").unwrap_or(defaults.smtp_host),
            smtp_port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.smtp_port),
            username: std::env::var("SMTP_USERNAME").unwrap_or(defaults.username),
            password: std::env::var("SMTP_PASSWORD").unwrap_or(defaults.password),
            from_address: std::env::var("EMAIL_FROM").unwrap_or(defaults.from_address),
            use_ssl: std::env::var("ALLOW_SSL")
                .map(|v| matches!(v.trim(), "true" | "1"))
                .unwrap_or(defaults.use_ssl),
        }
    }
}
