//! Mock implementation of AccountRepository for testing

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::{Account, User, UserMetadata};
use crate::errors::{AuthError, DomainError};

use super::trait_::{AccountRepository, MetadataPatch, UserPatch};

/// In-memory account repository for tests
///
/// Mirrors the store contract including the all-or-nothing
/// `create_account` and the not-expired filter on reset-token lookups.
pub struct MockAccountRepository {
    accounts: Arc<RwLock<HashMap<Uuid, (User, UserMetadata)>>>,
}

impl MockAccountRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        Self {
            accounts: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Number of stored accounts (test assertion helper)
    pub async fn account_count(&self) -> usize {
        self.accounts.read().await.len()
    }
}

impl Default for MockAccountRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AccountRepository for MockAccountRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .values()
            .find(|(user, _)| user.email == email)
            .map(|(user, metadata)| Account::new(user.clone(), metadata.clone())))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .get(&id)
            .map(|(user, metadata)| Account::new(user.clone(), metadata.clone())))
    }

    async fn create_account(
        &self,
        user: User,
        metadata: UserMetadata,
    ) -> Result<Account, DomainError> {
        let mut accounts = self.accounts.write().await;

        if accounts.values().any(|(u, _)| u.email == user.email) {
            return Err(DomainError::Auth(AuthError::EmailAlreadyRegistered));
        }

        let account = Account::new(user.clone(), metadata);
        accounts.insert(user.id, (account.user.clone(), account.metadata.clone()));
        Ok(account)
    }

    async fn update_user(&self, id: Uuid, patch: UserPatch) -> Result<(), DomainError> {
        let mut accounts = self.accounts.write().await;
        let (user, _) = accounts.get_mut(&id).ok_or(DomainError::NotFound {
            resource: "User".to_string(),
        })?;

        if let Some(email) = patch.email {
            user.email = email;
        }
        if let Some(first_name) = patch.first_name {
            user.first_name = first_name;
        }
        if let Some(last_name) = patch.last_name {
            user.last_name = last_name;
        }
        if let Some(password_hash) = patch.password_hash {
            user.password_hash = password_hash;
        }
        if let Some(is_active) = patch.is_active {
            user.is_active = is_active;
        }
        if let Some(role) = patch.role {
            user.role = role;
        }
        user.updated_at = Utc::now();
        Ok(())
    }

    async fn update_metadata(
        &self,
        user_id: Uuid,
        patch: MetadataPatch,
    ) -> Result<(), DomainError> {
        let mut accounts = self.accounts.write().await;
        let (_, metadata) = accounts.get_mut(&user_id).ok_or(DomainError::NotFound {
            resource: "UserMetadata".to_string(),
        })?;

        if let Some(email_verified) = patch.email_verified {
            metadata.email_verified = email_verified;
        }
        if let Some(phone_number) = patch.phone_number {
            metadata.phone_number = phone_number;
        }
        if let Some(address) = patch.address {
            metadata.address = address;
        }
        if let Some(profile_picture) = patch.profile_picture {
            metadata.profile_picture = profile_picture;
        }
        if let Some(token) = patch.email_verification_token {
            metadata.email_verification_token = token;
        }
        if let Some(token) = patch.reset_password_token {
            metadata.reset_password_token = token;
        }
        if let Some(expires_at) = patch.reset_password_expires_at {
            metadata.reset_password_expires_at = expires_at;
        }
        metadata.updated_at = Utc::now();
        Ok(())
    }

    async fn find_metadata_by_reset_token(
        &self,
        token: &str,
    ) -> Result<Option<UserMetadata>, DomainError> {
        let now = Utc::now();
        let accounts = self.accounts.read().await;
        Ok(accounts
            .values()
            .find(|(_, metadata)| {
                metadata.reset_password_token.as_deref() == Some(token)
                    && metadata
                        .reset_password_expires_at
                        .map(|expires_at| expires_at > now)
                        .unwrap_or(false)
            })
            .map(|(_, metadata)| metadata.clone()))
    }

    async fn find_metadata_by_verification_token(
        &self,
        token: &str,
    ) -> Result<Option<UserMetadata>, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .values()
            .find(|(_, metadata)| metadata.email_verification_token.as_deref() == Some(token))
            .map(|(_, metadata)| metadata.clone()))
    }
}
