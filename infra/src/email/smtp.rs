//! SMTP delivery via lettre's async transport

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use um_core::errors::{DomainError, DomainResult};
use um_core::services::notification::{MailMessage, Mailer};
use um_shared::config::EmailConfig;

use crate::InfrastructureError;

/// SMTP implementation of the `Mailer` boundary
///
/// The transport keeps a small connection pool; each send borrows a
/// connection, so concurrent background deliveries do not serialize on
/// a single session.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from_address: String,
}

impl SmtpMailer {
    /// Build the SMTP transport from configuration
    ///
    /// `use_ssl` selects implicit TLS (SMTPS, typically port 465);
    /// otherwise the connection is upgraded with STARTTLS (typically
    /// port 587).
    pub fn new(config: &EmailConfig) -> Result<Self, InfrastructureError> {
        let builder = if config.use_ssl {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
        }
        .map_err(|e| InfrastructureError::Email(format!("Invalid SMTP relay: {}", e)))?;

        let transport = builder
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .port(config.smtp_port)
            .build();

        Ok(Self {
            transport,
            from_address: config.from_address.clone(),
        })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, message: MailMessage) -> DomainResult<()> {
        let email = Message::builder()
            .from(self.from_address.parse().map_err(|e| DomainError::Internal {
                message: format!("Invalid from address: {}", e),
            })?)
            .to(message.to.parse().map_err(|e| DomainError::Internal {
                message: format!("Invalid to address: {}", e),
            })?)
            .subject(&message.subject)
            .header(ContentType::TEXT_HTML)
            .body(message.html_body)
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to build email: {}", e),
            })?;

        self.transport
            .send(email)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("SMTP delivery failed: {}", e),
            })?;

        tracing::debug!(to = %message.to, "Email delivered");
        Ok(())
    }
}
