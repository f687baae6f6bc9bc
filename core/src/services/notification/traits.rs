//! Delivery-channel trait for outbound email

use async_trait::async_trait;

use crate::errors::DomainResult;

/// A rendered email ready for delivery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailMessage {
    /// Recipient address
    pub to: String,
    /// Subject line
    pub subject: String,
    /// Rendered HTML body
    pub html_body: String,
}

/// Outbound email delivery channel
///
/// Implementations accept a rendered message and a destination; they do
/// not know what the message is for.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Deliver a message
    async fn send(&self, message: MailMessage) -> DomainResult<()>;
}
