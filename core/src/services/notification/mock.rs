//! Mock mailer for testing

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::errors::{DomainError, DomainResult};

use super::traits::{MailMessage, Mailer};

/// Mailer that records messages instead of delivering them
///
/// Can be switched into a failing mode to exercise the fire-and-forget
/// error-swallowing path.
pub struct MockMailer {
    sent: Arc<RwLock<Vec<MailMessage>>>,
    fail_sends: bool,
}

impl MockMailer {
    /// Create a mailer that accepts every message
    pub fn new() -> Self {
        Self {
            sent: Arc::new(RwLock::new(Vec::new())),
            fail_sends: false,
        }
    }

    /// Create a mailer whose every send fails
    pub fn failing() -> Self {
        Self {
            sent: Arc::new(RwLock::new(Vec::new())),
            fail_sends: true,
        }
    }

    /// Messages recorded so far
    pub async fn sent_messages(&self) -> Vec<MailMessage> {
        self.sent.read().await.clone()
    }

    /// Number of messages recorded so far
    pub async fn sent_count(&self) -> usize {
        self.sent.read().await.len()
    }
}

impl Default for MockMailer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Mailer for MockMailer {
    async fn send(&self, message: MailMessage) -> DomainResult<()> {
        if self.fail_sends {
            return Err(DomainError::Internal {
                message: "Mock mailer configured to fail".to_string(),
            });
        }
        self.sent.write().await.push(message);
        Ok(())
    }
}
