//! PostgreSQL implementation of the AccountRepository trait.
//!
//! Reads join `users` and `user_metadata` in one statement so the
//! account view is atomic. Registration inserts both rows inside a
//! single transaction; a failure after the user insert rolls the user
//! back, so an account can never exist without its metadata.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use um_core::domain::entities::{Account, User, UserMetadata};
use um_core::errors::{AuthError, DomainError};
use um_core::repositories::account::{AccountRepository, MetadataPatch, UserPatch};

/// PostgreSQL implementation of AccountRepository
pub struct PgAccountRepository {
    /// Database connection pool
    pool: PgPool,
}

/// Joined select used by both account lookups; metadata columns are
/// aliased to avoid clashing with the user columns
const SELECT_ACCOUNT: &str = r#"
    SELECT u.id, u.email, u.first_name, u.last_name, u.password_hash,
           u.is_active, u.role, u.created_at, u.updated_at,
           m.id AS metadata_id, m.user_id, m.email_verified,
           m.phone_number, m.address, m.profile_picture,
           m.email_verification_token, m.reset_password_token,
           m.reset_password_expires_at, m.locked_until,
           m.created_at AS metadata_created_at,
           m.updated_at AS metadata_updated_at
    FROM users u
    JOIN user_metadata m ON m.user_id = u.id
"#;

impl PgAccountRepository {
    /// Create a new PostgreSQL account repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn db_err(context: &str, e: sqlx::Error) -> DomainError {
        DomainError::Database {
            message: format!("{}: {}", context, e),
        }
    }

    /// Map a joined row to the Account read model
    fn row_to_account(row: &PgRow) -> Result<Account, DomainError> {
        let user = User {
            id: row
                .try_get("id")
                .map_err(|e| Self::db_err("Failed to get id", e))?,
            email: row
                .try_get("email")
                .map_err(|e| Self::db_err("Failed to get email", e))?,
            first_name: row
                .try_get("first_name")
                .map_err(|e| Self::db_err("Failed to get first_name", e))?,
            last_name: row
                .try_get("last_name")
                .map_err(|e| Self::db_err("Failed to get last_name", e))?,
            password_hash: row
                .try_get("password_hash")
                .map_err(|e| Self::db_err("Failed to get password_hash", e))?,
            is_active: row
                .try_get("is_active")
                .map_err(|e| Self::db_err("Failed to get is_active", e))?,
            role: row
                .try_get("role")
                .map_err(|e| Self::db_err("Failed to get role", e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| Self::db_err("Failed to get created_at", e))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| Self::db_err("Failed to get updated_at", e))?,
        };

        let metadata = Self::row_to_metadata(row, "metadata_id", "metadata_created_at", "metadata_updated_at")?;

        Ok(Account::new(user, metadata))
    }

    /// Map metadata columns to the entity; alias parameters let the
    /// same mapper serve the joined and the standalone selects
    fn row_to_metadata(
        row: &PgRow,
        id_col: &str,
        created_col: &str,
        updated_col: &str,
    ) -> Result<UserMetadata, DomainError> {
        Ok(UserMetadata {
            id: row
                .try_get(id_col)
                .map_err(|e| Self::db_err("Failed to get metadata id", e))?,
            user_id: row
                .try_get("user_id")
                .map_err(|e| Self::db_err("Failed to get user_id", e))?,
            email_verified: row
                .try_get("email_verified")
                .map_err(|e| Self::db_err("Failed to get email_verified", e))?,
            phone_number: row
                .try_get("phone_number")
                .map_err(|e| Self::db_err("Failed to get phone_number", e))?,
            address: row
                .try_get("address")
                .map_err(|e| Self::db_err("Failed to get address", e))?,
            profile_picture: row
                .try_get("profile_picture")
                .map_err(|e| Self::db_err("Failed to get profile_picture", e))?,
            email_verification_token: row
                .try_get("email_verification_token")
                .map_err(|e| Self::db_err("Failed to get email_verification_token", e))?,
            reset_password_token: row
                .try_get("reset_password_token")
                .map_err(|e| Self::db_err("Failed to get reset_password_token", e))?,
            reset_password_expires_at: row
                .try_get("reset_password_expires_at")
                .map_err(|e| Self::db_err("Failed to get reset_password_expires_at", e))?,
            locked_until: row
                .try_get("locked_until")
                .map_err(|e| Self::db_err("Failed to get locked_until", e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>(created_col)
                .map_err(|e| Self::db_err("Failed to get metadata created_at", e))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>(updated_col)
                .map_err(|e| Self::db_err("Failed to get metadata updated_at", e))?,
        })
    }
}

#[async_trait]
impl AccountRepository for PgAccountRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError> {
        let query = format!("{} WHERE u.email = $1 LIMIT 1", SELECT_ACCOUNT);

        let result = sqlx::query(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| Self::db_err("Account lookup by email failed", e))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_account(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError> {
        let query = format!("{} WHERE u.id = $1 LIMIT 1", SELECT_ACCOUNT);

        let result = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| Self::db_err("Account lookup by id failed", e))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_account(&row)?)),
            None => Ok(None),
        }
    }

    async fn create_account(
        &self,
        user: User,
        metadata: UserMetadata,
    ) -> Result<Account, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| Self::db_err("Failed to open registration transaction", e))?;

        let insert_user = r#"
            INSERT INTO users (
                id, email, first_name, last_name, password_hash,
                is_active, role, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        "#;

        let user_result = sqlx::query(insert_user)
            .bind(user.id)
            .bind(&user.email)
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(&user.password_hash)
            .bind(user.is_active)
            .bind(user.role)
            .bind(user.created_at)
            .bind(user.updated_at)
            .execute(&mut *tx)
            .await;

        if let Err(e) = user_result {
            // A unique violation on users.email is a registration
            // conflict, not a storage fault
            if let sqlx::Error::Database(ref db_err) = e {
                if db_err.is_unique_violation() {
                    return Err(DomainError::Auth(AuthError::EmailAlreadyRegistered));
                }
            }
            return Err(Self::db_err("Failed to insert user", e));
        }

        let insert_metadata = r#"
            INSERT INTO user_metadata (
                id, user_id, email_verified, phone_number, address,
                profile_picture, email_verification_token,
                reset_password_token, reset_password_expires_at,
                locked_until, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
        "#;

        sqlx::query(insert_metadata)
            .bind(metadata.id)
            .bind(metadata.user_id)
            .bind(metadata.email_verified)
            .bind(&metadata.phone_number)
            .bind(&metadata.address)
            .bind(&metadata.profile_picture)
            .bind(&metadata.email_verification_token)
            .bind(&metadata.reset_password_token)
            .bind(metadata.reset_password_expires_at)
            .bind(metadata.locked_until)
            .bind(metadata.created_at)
            .bind(metadata.updated_at)
            .execute(&mut *tx)
            .await
            .map_err(|e| Self::db_err("Failed to insert user metadata", e))?;

        tx.commit()
            .await
            .map_err(|e| Self::db_err("Failed to commit registration", e))?;

        Ok(Account::new(user, metadata))
    }

    async fn update_user(&self, id: Uuid, patch: UserPatch) -> Result<(), DomainError> {
        // CASE-gated assignments let one statement apply any subset of
        // fields, including clearing the nullable role column
        let query = r#"
            UPDATE users SET
                email = CASE WHEN $1 THEN $2 ELSE email END,
                first_name = CASE WHEN $3 THEN $4 ELSE first_name END,
                last_name = CASE WHEN $5 THEN $6 ELSE last_name END,
                password_hash = CASE WHEN $7 THEN $8 ELSE password_hash END,
                is_active = CASE WHEN $9 THEN $10 ELSE is_active END,
                role = CASE WHEN $11 THEN $12 ELSE role END,
                updated_at = $13
            WHERE id = $14
        "#;

        let result = sqlx::query(query)
            .bind(patch.email.is_some())
            .bind(patch.email)
            .bind(patch.first_name.is_some())
            .bind(patch.first_name)
            .bind(patch.last_name.is_some())
            .bind(patch.last_name)
            .bind(patch.password_hash.is_some())
            .bind(patch.password_hash)
            .bind(patch.is_active.is_some())
            .bind(patch.is_active)
            .bind(patch.role.is_some())
            .bind(patch.role.flatten())
            .bind(Utc::now())
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| Self::db_err("Failed to update user", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound {
                resource: "User".to_string(),
            });
        }
        Ok(())
    }

    async fn update_metadata(
        &self,
        user_id: Uuid,
        patch: MetadataPatch,
    ) -> Result<(), DomainError> {
        let query = r#"
            UPDATE user_metadata SET
                email_verified = CASE WHEN $1 THEN $2 ELSE email_verified END,
                phone_number = CASE WHEN $3 THEN $4 ELSE phone_number END,
                address = CASE WHEN $5 THEN $6 ELSE address END,
                profile_picture = CASE WHEN $7 THEN $8 ELSE profile_picture END,
                email_verification_token = CASE WHEN $9 THEN $10 ELSE email_verification_token END,
                reset_password_token = CASE WHEN $11 THEN $12 ELSE reset_password_token END,
                reset_password_expires_at = CASE WHEN $13 THEN $14 ELSE reset_password_expires_at END,
                updated_at = $15
            WHERE user_id = $16
        "#;

        let result = sqlx::query(query)
            .bind(patch.email_verified.is_some())
            .bind(patch.email_verified)
            .bind(patch.phone_number.is_some())
            .bind(patch.phone_number.flatten())
            .bind(patch.address.is_some())
            .bind(patch.address.flatten())
            .bind(patch.profile_picture.is_some())
            .bind(patch.profile_picture.flatten())
            .bind(patch.email_verification_token.is_some())
            .bind(patch.email_verification_token.flatten())
            .bind(patch.reset_password_token.is_some())
            .bind(patch.reset_password_token.flatten())
            .bind(patch.reset_password_expires_at.is_some())
            .bind(patch.reset_password_expires_at.flatten())
            .bind(Utc::now())
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| Self::db_err("Failed to update user metadata", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound {
                resource: "UserMetadata".to_string(),
            });
        }
        Ok(())
    }

    async fn find_metadata_by_reset_token(
        &self,
        token: &str,
    ) -> Result<Option<UserMetadata>, DomainError> {
        // The expiry filter lives in the query: an expired match never
        // leaves the database, so callers cannot tell it from absence
        let query = r#"
            SELECT id, user_id, email_verified, phone_number, address,
                   profile_picture, email_verification_token,
                   reset_password_token, reset_password_expires_at,
                   locked_until, created_at, updated_at
            FROM user_metadata
            WHERE reset_password_token = $1
              AND reset_password_expires_at > NOW()
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(token)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| Self::db_err("Reset token lookup failed", e))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_metadata(
                &row,
                "id",
                "created_at",
                "updated_at",
            )?)),
            None => Ok(None),
        }
    }

    async fn find_metadata_by_verification_token(
        &self,
        token: &str,
    ) -> Result<Option<UserMetadata>, DomainError> {
        let query = r#"
            SELECT id, user_id, email_verified, phone_number, address,
                   profile_picture, email_verification_token,
                   reset_password_token, reset_password_expires_at,
                   locked_until, created_at, updated_at
            FROM user_metadata
            WHERE email_verification_token = $1
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(token)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| Self::db_err("Verification token lookup failed", e))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_metadata(
                &row,
                "id",
                "created_at",
                "updated_at",
            )?)),
            None => Ok(None),
        }
    }
}
