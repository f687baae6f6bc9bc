//! Per-user metadata companion record.
//!
//! Holds profile contact fields and the verification/reset bookkeeping
//! the workflow engine mutates. Exactly one row exists per user; it is
//! created together with the user and removed with it (cascade).

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One-to-one companion record to [`super::User`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserMetadata {
    /// Unique identifier for the metadata row
    pub id: Uuid,

    /// Owning user's id (unique foreign key)
    pub user_id: Uuid,

    /// Whether the user's email address has been verified
    pub email_verified: bool,

    /// Optional contact phone number
    pub phone_number: Option<String>,

    /// Optional postal address
    pub address: Option<String>,

    /// Optional URL or path to a profile picture
    pub profile_picture: Option<String>,

    /// Last-issued email verification token; cleared on successful
    /// verification so a redeemed link cannot be replayed
    pub email_verification_token: Option<String>,

    /// Outstanding password reset token, if any
    pub reset_password_token: Option<String>,

    /// Expiry of the outstanding reset token
    pub reset_password_expires_at: Option<DateTime<Utc>>,

    /// Reserved for lockout handling; no logic manipulates this field
    pub locked_until: Option<DateTime<Utc>>,

    /// Timestamp when the row was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the row was last updated
    pub updated_at: DateTime<Utc>,
}

impl UserMetadata {
    /// Creates the metadata row for a freshly registered user
    pub fn new(user_id: Uuid, phone_number: Option<String>, address: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            email_verified: false,
            phone_number,
            address,
            profile_picture: None,
            email_verification_token: None,
            reset_password_token: None,
            reset_password_expires_at: None,
            locked_until: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Stores a newly issued reset token, overwriting any prior one so
    /// previously mailed links stop matching
    pub fn set_reset_token(&mut self, token: String, ttl: Duration) {
        self.reset_password_token = Some(token);
        self.reset_password_expires_at = Some(Utc::now() + ttl);
        self.updated_at = Utc::now();
    }

    /// Consumes the outstanding reset token
    pub fn clear_reset_token(&mut self) {
        self.reset_password_token = None;
        self.reset_password_expires_at = None;
        self.updated_at = Utc::now();
    }

    /// Stores a newly issued verification token, overwriting any prior one
    pub fn set_verification_token(&mut self, token: String) {
        self.email_verification_token = Some(token);
        self.updated_at = Utc::now();
    }

    /// Marks the email verified and consumes the verification token
    pub fn mark_email_verified(&mut self) {
        self.email_verified = true;
        self.email_verification_token = None;
        self.updated_at = Utc::now();
    }

    /// Whether a reset token is outstanding and still unexpired
    pub fn has_live_reset_token(&self) -> bool {
        match (&self.reset_password_token, self.reset_password_expires_at) {
            (Some(_), Some(expires_at)) => expires_at > Utc::now(),
            _ => false,
        }
    }
}
