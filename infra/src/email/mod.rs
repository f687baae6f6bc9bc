//! Email delivery module
//!
//! Implementations of the core `Mailer` boundary:
//!
//! - **SmtpMailer**: real delivery over lettre's async SMTP transport
//! - **LogMailer**: logs messages instead of sending them, for
//!   development environments without an SMTP account
//!
//! [`create_mailer`] picks the implementation from configuration and
//! falls back to logging when the SMTP transport cannot be built, so a
//! bad mail config degrades delivery rather than startup.

pub mod log_mailer;
pub mod smtp;

pub use log_mailer::LogMailer;
pub use smtp::SmtpMailer;

use async_trait::async_trait;
use um_core::errors::DomainResult;
use um_core::services::notification::{MailMessage, Mailer};
use um_shared::config::EmailConfig;

/// Mailer selected at startup from configuration
pub enum MailTransport {
    Smtp(SmtpMailer),
    Log(LogMailer),
}

#[async_trait]
impl Mailer for MailTransport {
    async fn send(&self, message: MailMessage) -> DomainResult<()> {
        match self {
            MailTransport::Smtp(mailer) => mailer.send(message).await,
            MailTransport::Log(mailer) => mailer.send(message).await,
        }
    }
}

/// Create a mailer based on configuration
pub fn create_mailer(config: &EmailConfig) -> MailTransport {
    match config.provider.as_str() {
        "smtp" => match SmtpMailer::new(config) {
            Ok(mailer) => MailTransport::Smtp(mailer),
            Err(e) => {
                tracing::error!("Failed to initialize SMTP mailer: {}", e);
                tracing::warn!("Falling back to log-only mailer");
                MailTransport::Log(LogMailer::new())
            }
        },
        "mock" => MailTransport::Log(LogMailer::new()),
        other => {
            tracing::warn!("Unknown email provider '{}', using log-only mailer", other);
            MailTransport::Log(LogMailer::new())
        }
    }
}
