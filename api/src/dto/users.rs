//! User endpoint DTOs
//!
//! Requests are validated at the boundary with `validator` derives;
//! handlers reject invalid payloads before the workflow engine sees
//! them. Response views never expose the stored password hash.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use um_core::domain::entities::Account;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1, max = 100))]
    pub first_name: String,

    #[validate(length(min = 1, max = 100))]
    pub last_name: String,

    #[validate(length(min = 8, max = 128))]
    pub password: String,

    pub role: Option<Uuid>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginData {
    pub user_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PasswordResetRequest {
    #[validate(email)]
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    /// Reset token from the mailed link; authorizes the commit
    #[validate(length(min = 1))]
    pub reset_token: String,

    #[validate(length(min = 8, max = 128))]
    pub new_password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(email)]
    pub email: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub first_name: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub last_name: Option<String>,

    pub role: Option<Uuid>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub profile_picture: Option<String>,
}

/// Projection of a user's metadata row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetadataView {
    pub email_verified: bool,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub profile_picture: Option<String>,
}

/// Projection of the joined account returned by read endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserView {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub is_active: bool,
    pub role: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub metadata: MetadataView,
}

impl From<Account> for UserView {
    fn from(account: Account) -> Self {
        Self {
            id: account.user.id,
            email: account.user.email,
            first_name: account.user.first_name,
            last_name: account.user.last_name,
            is_active: account.user.is_active,
            role: account.user.role,
            created_at: account.user.created_at,
            updated_at: account.user.updated_at,
            metadata: MetadataView {
                email_verified: account.metadata.email_verified,
                phone_number: account.metadata.phone_number,
                address: account.metadata.address,
                profile_picture: account.metadata.profile_picture,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_validation() {
        let valid = RegisterRequest {
            email: "a@x.com".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            password: "long enough".to_string(),
            role: None,
            phone_number: None,
            address: None,
        };
        assert!(valid.validate().is_ok());

        let bad_email = RegisterRequest {
            email: "not-an-email".to_string(),
            ..valid.clone()
        };
        assert!(bad_email.validate().is_err());

        let short_password = RegisterRequest {
            password: "short".to_string(),
            ..valid
        };
        assert!(short_password.validate().is_err());
    }

    #[test]
    fn test_user_view_has_no_password_hash_field() {
        use um_core::domain::entities::{User, UserMetadata};

        let user = User::new(
            "a@x.com".to_string(),
            "Ada".to_string(),
            "Lovelace".to_string(),
            "$2b$12$secret".to_string(),
            None,
        );
        let metadata = UserMetadata::new(user.id, None, None);
        let view: UserView = Account::new(user, metadata).into();

        let json = serde_json::to_value(&view).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["metadata"]["email_verified"], false);
    }
}
