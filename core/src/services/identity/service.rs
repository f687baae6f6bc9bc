//! Main identity workflow engine implementation

use std::sync::Arc;

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::domain::entities::token::TokenPurpose;
use crate::domain::entities::{Account, User, UserMetadata};
use crate::domain::value_objects::AuthSession;
use crate::errors::{AuthError, DomainResult};
use crate::repositories::account::{AccountRepository, MetadataPatch, UserPatch};
use crate::services::notification::{EmailComposer, MailMessage, Mailer};
use crate::services::password::PasswordHasher;
use crate::services::token::TokenService;

use super::config::IdentityServiceConfig;

/// Input to [`IdentityService::register`]
///
/// `password` is plaintext here and nowhere else; it is hashed before
/// any row is written.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Option<Uuid>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
}

/// Partial profile update applied by [`IdentityService::update_user`]
///
/// Spans both rows; unset fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Option<Option<Uuid>>,
    pub phone_number: Option<Option<String>>,
    pub address: Option<Option<String>>,
    pub profile_picture: Option<Option<String>>,
}

/// Identity workflow engine
///
/// The only writer of the verification/reset fields on `UserMetadata`.
/// All cross-request state lives in the account store; the service
/// itself is freely shareable across request tasks.
pub struct IdentityService<R, M>
where
    R: AccountRepository,
    M: Mailer + 'static,
{
    /// Account store boundary
    repository: Arc<R>,
    /// Outbound email channel
    mailer: Arc<M>,
    /// Token signing and verification
    token_service: Arc<TokenService>,
    /// Credential hashing
    password_hasher: PasswordHasher,
    /// Notification composition
    composer: EmailComposer,
    /// Service configuration
    config: IdentityServiceConfig,
}

impl<R, M> IdentityService<R, M>
where
    R: AccountRepository,
    M: Mailer + 'static,
{
    /// Create a new identity workflow engine
    pub fn new(
        repository: Arc<R>,
        mailer: Arc<M>,
        token_service: Arc<TokenService>,
        password_hasher: PasswordHasher,
        composer: EmailComposer,
        config: IdentityServiceConfig,
    ) -> Self {
        Self {
            repository,
            mailer,
            token_service,
            password_hasher,
            composer,
            config,
        }
    }

    /// Register a new account
    ///
    /// Fails with `EmailAlreadyRegistered` if the email is taken. The
    /// user and metadata rows are created as one logical registration;
    /// no token is issued here.
    pub async fn register(&self, new_account: NewAccount) -> DomainResult<()> {
        // Step 1: the joined read is the single source of truth for
        // email existence
        if self
            .repository
            .find_by_email(&new_account.email)
            .await?
            .is_some()
        {
            return Err(AuthError::EmailAlreadyRegistered.into());
        }

        // Step 2: plaintext stops existing here
        let password_hash = self.password_hasher.hash(&new_account.password)?;

        // Step 3: both rows in one all-or-nothing store operation
        let user = User::new(
            new_account.email,
            new_account.first_name,
            new_account.last_name,
            password_hash,
            new_account.role,
        );
        let metadata = UserMetadata::new(user.id, new_account.phone_number, new_account.address);

        let account = self.repository.create_account(user, metadata).await?;
        tracing::info!(user_id = %account.user.id, "Registered new account");
        Ok(())
    }

    /// Authenticate credentials and issue a session token
    ///
    /// Login does not require a verified email; verification gates
    /// nothing but the `email_verified` flag itself.
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<AuthSession> {
        let account = self
            .repository
            .find_by_email(email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if !self
            .password_hasher
            .verify(password, &account.user.password_hash)
        {
            tracing::info!(user_id = %account.user.id, "Login rejected: bad credentials");
            return Err(AuthError::InvalidCredentials.into());
        }

        let (access_token, expires_in) = self
            .token_service
            .issue_session(account.user.id, &account.user.email)?;

        Ok(AuthSession::new(account.user.id, access_token, expires_in))
    }

    /// Issue a password reset token and mail the reset link
    ///
    /// The token is persisted with a fresh expiry window before the
    /// email is dispatched; every issuance overwrites the previous
    /// token, so at most one mailed link is ever redeemable.
    pub async fn request_password_reset(&self, email: &str) -> DomainResult<()> {
        let account = self
            .repository
            .find_by_email(email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let token = self.token_service.issue_action(
            account.user.id,
            &account.user.email,
            TokenPurpose::PasswordReset,
        )?;
        let expires_at = Utc::now() + Duration::minutes(self.config.reset_token_ttl_minutes);

        self.repository
            .update_metadata(
                account.user.id,
                MetadataPatch {
                    reset_password_token: Some(Some(token.clone())),
                    reset_password_expires_at: Some(Some(expires_at)),
                    ..Default::default()
                },
            )
            .await?;

        tracing::info!(user_id = %account.user.id, "Password reset requested");
        self.dispatch(self.composer.reset_password_email(
            &account.user.email,
            &account.user.display_name(),
            &token,
            self.config.reset_token_ttl_minutes,
        ));
        Ok(())
    }

    /// Pre-check a reset token before the client collects a new password
    ///
    /// Pure gate: no state changes. An expired token and an unknown one
    /// are deliberately indistinguishable.
    pub async fn verify_password_reset(&self, token: &str) -> DomainResult<()> {
        self.repository
            .find_metadata_by_reset_token(token)
            .await?
            .ok_or(AuthError::PasswordResetExpired)?;
        Ok(())
    }

    /// Commit a password reset
    ///
    /// The live reset token is the authorization input: whoever holds
    /// an unexpired token may set the new password. The token is
    /// consumed in the same operation, so a mailed link works once.
    pub async fn reset_password(&self, token: &str, new_password: &str) -> DomainResult<()> {
        let metadata = self
            .repository
            .find_metadata_by_reset_token(token)
            .await?
            .ok_or(AuthError::PasswordResetExpired)?;

        let password_hash = self.password_hasher.hash(new_password)?;

        self.repository
            .update_user(
                metadata.user_id,
                UserPatch {
                    password_hash: Some(password_hash),
                    ..Default::default()
                },
            )
            .await?;

        // Consume the token so the link cannot be replayed
        self.repository
            .update_metadata(
                metadata.user_id,
                MetadataPatch {
                    reset_password_token: Some(None),
                    reset_password_expires_at: Some(None),
                    ..Default::default()
                },
            )
            .await?;

        tracing::info!(user_id = %metadata.user_id, "Password reset committed");
        Ok(())
    }

    /// Issue an email verification token and mail the verification link
    ///
    /// The exact token string is persisted before dispatch so the
    /// verify step can match it by equality.
    pub async fn request_email_verification(&self, email: &str) -> DomainResult<()> {
        let account = self
            .repository
            .find_by_email(email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let token = self.token_service.issue_action(
            account.user.id,
            &account.user.email,
            TokenPurpose::EmailVerification,
        )?;

        self.repository
            .update_metadata(
                account.user.id,
                MetadataPatch {
                    email_verification_token: Some(Some(token.clone())),
                    ..Default::default()
                },
            )
            .await?;

        tracing::info!(user_id = %account.user.id, "Email verification requested");
        self.dispatch(self.composer.verification_email(
            &account.user.email,
            &account.user.display_name(),
            &token,
            self.token_service.action_ttl_minutes(),
        ));
        Ok(())
    }

    /// Redeem an email verification token
    pub async fn verify_email(&self, token: &str) -> DomainResult<()> {
        let metadata = self
            .repository
            .find_metadata_by_verification_token(token)
            .await?
            .ok_or(AuthError::EmailVerificationExpired)?;

        self.repository
            .update_metadata(
                metadata.user_id,
                MetadataPatch {
                    email_verified: Some(true),
                    email_verification_token: Some(None),
                    ..Default::default()
                },
            )
            .await?;

        tracing::info!(user_id = %metadata.user_id, "Email verified");
        Ok(())
    }

    /// Fetch the joined account view for a user id
    pub async fn get_user(&self, id: Uuid) -> DomainResult<Account> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AuthError::UserNotFound.into())
    }

    /// Apply a partial profile update across both rows
    ///
    /// Existence is checked first; the two row updates that follow are
    /// separate writes, matching the store's per-statement atomicity.
    pub async fn update_user(&self, id: Uuid, update: ProfileUpdate) -> DomainResult<()> {
        self.get_user(id).await?;

        let user_patch = UserPatch {
            email: update.email,
            first_name: update.first_name,
            last_name: update.last_name,
            role: update.role,
            ..Default::default()
        };
        let metadata_patch = MetadataPatch {
            phone_number: update.phone_number,
            address: update.address,
            profile_picture: update.profile_picture,
            ..Default::default()
        };

        if !user_patch.is_empty() {
            self.repository.update_user(id, user_patch).await?;
        }
        if !metadata_patch.is_empty() {
            self.repository.update_metadata(id, metadata_patch).await?;
        }

        tracing::info!(user_id = %id, "Profile updated");
        Ok(())
    }

    /// Launch a delivery as fire-and-forget background work
    ///
    /// The request task never waits on SMTP, and a delivery failure is
    /// logged and swallowed rather than surfaced to the caller.
    fn dispatch(&self, message: MailMessage) {
        let mailer = Arc::clone(&self.mailer);
        tokio::spawn(async move {
            let recipient = message.to.clone();
            if let Err(e) = mailer.send(message).await {
                tracing::warn!(to = %recipient, error = %e, "Email delivery failed");
            }
        });
    }
}
