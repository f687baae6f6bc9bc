//! Account repository trait defining the interface for account persistence.
//!
//! This is the only boundary the workflow engine talks to: every lookup
//! and mutation of User/UserMetadata rows goes through this trait, and
//! implementations keep the joined read atomic.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::{Account, User, UserMetadata};
use crate::errors::DomainError;

/// Partial update of a `User` row
///
/// `None` fields are left untouched. `role` is doubly optional because
/// the column is nullable: `Some(None)` clears it.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub password_hash: Option<String>,
    pub is_active: Option<bool>,
    pub role: Option<Option<Uuid>>,
}

/// Partial update of a `UserMetadata` row
///
/// Same convention as [`UserPatch`]: outer `None` means "leave
/// unchanged", inner `None` means "set NULL".
#[derive(Debug, Clone, Default)]
pub struct MetadataPatch {
    pub email_verified: Option<bool>,
    pub phone_number: Option<Option<String>>,
    pub address: Option<Option<String>>,
    pub profile_picture: Option<Option<String>>,
    pub email_verification_token: Option<Option<String>>,
    pub reset_password_token: Option<Option<String>>,
    pub reset_password_expires_at: Option<Option<DateTime<Utc>>>,
}

impl UserPatch {
    /// Whether the patch changes anything
    pub fn is_empty(&self) -> bool {
        self.email.is_none()
            && self.first_name.is_none()
            && self.last_name.is_none()
            && self.password_hash.is_none()
            && self.is_active.is_none()
            && self.role.is_none()
    }
}

impl MetadataPatch {
    /// Whether the patch changes anything
    pub fn is_empty(&self) -> bool {
        self.email_verified.is_none()
            && self.phone_number.is_none()
            && self.address.is_none()
            && self.profile_picture.is_none()
            && self.email_verification_token.is_none()
            && self.reset_password_token.is_none()
            && self.reset_password_expires_at.is_none()
    }
}

/// Repository trait for account persistence operations
///
/// Implementations provide per-statement atomicity; `create_account` is
/// the one multi-row operation and must be all-or-nothing so a user row
/// can never exist without its metadata row.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Find an account by email via an atomic joined read
    ///
    /// This is the single source of truth for "does this email exist":
    /// registration conflict checks and credential lookups both use it.
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError>;

    /// Find an account by user id via an atomic joined read
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError>;

    /// Persist a new user together with its metadata row
    ///
    /// Both writes succeed or neither does. Fails if the email is
    /// already registered.
    async fn create_account(
        &self,
        user: User,
        metadata: UserMetadata,
    ) -> Result<Account, DomainError>;

    /// Apply a partial update to the user row with the given id
    async fn update_user(&self, id: Uuid, patch: UserPatch) -> Result<(), DomainError>;

    /// Apply a partial update to the metadata row keyed by user id
    async fn update_metadata(&self, user_id: Uuid, patch: MetadataPatch)
        -> Result<(), DomainError>;

    /// Find the metadata row holding this reset token, provided the
    /// token's stored expiry is still in the future
    ///
    /// A matched-but-expired token is indistinguishable from "not found".
    async fn find_metadata_by_reset_token(
        &self,
        token: &str,
    ) -> Result<Option<UserMetadata>, DomainError>;

    /// Find the metadata row holding this email verification token
    async fn find_metadata_by_verification_token(
        &self,
        token: &str,
    ) -> Result<Option<UserMetadata>, DomainError>;
}
