//! Log-only mailer for development

use async_trait::async_trait;

use um_core::errors::DomainResult;
use um_core::services::notification::{MailMessage, Mailer};

/// Mailer that logs messages instead of delivering them
pub struct LogMailer;

impl LogMailer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogMailer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, message: MailMessage) -> DomainResult<()> {
        tracing::info!(
            to = %message.to,
            subject = %message.subject,
            "Email delivery skipped (log-only mailer)"
        );
        tracing::debug!(body = %message.html_body, "Email body");
        Ok(())
    }
}
