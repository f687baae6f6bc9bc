//! User entity representing a registered account.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User entity representing a registered account
///
/// `password_hash` is the only credential material ever persisted;
/// plaintext passwords stop existing at the hashing boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user, generated at creation and immutable
    pub id: Uuid,

    /// Email address; unique across all users, stored case-sensitively
    pub email: String,

    /// Given name
    pub first_name: String,

    /// Family name
    pub last_name: String,

    /// Salted bcrypt digest of the password
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Whether the account is active
    pub is_active: bool,

    /// Optional role reference; carried as a foreign key only, no
    /// permission logic lives in this system
    pub role: Option<Uuid>,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the user was last updated
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new User with a fresh id and timestamps
    pub fn new(
        email: String,
        first_name: String,
        last_name: String,
        password_hash: String,
        role: Option<Uuid>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email,
            first_name,
            last_name,
            password_hash,
            is_active: true,
            role,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces the stored credential digest
    pub fn set_password_hash(&mut self, password_hash: String) {
        self.password_hash = password_hash;
        self.updated_at = Utc::now();
    }

    /// Deactivates the account
    pub fn deactivate(&mut self) {
        self.is_active = false;
        self.updated_at = Utc::now();
    }

    /// Full display name used in notification templates
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User::new(
            "a@x.com".to_string(),
            "Ada".to_string(),
            "Lovelace".to_string(),
            "$2b$12$fakehash".to_string(),
            None,
        )
    }

    #[test]
    fn test_new_user_defaults() {
        let user = sample_user();

        assert_eq!(user.email, "a@x.com");
        assert!(user.is_active);
        assert!(user.role.is_none());
        assert_eq!(user.created_at, user.updated_at);
    }

    #[test]
    fn test_set_password_hash_touches_updated_at() {
        let mut user = sample_user();
        let created = user.created_at;

        user.set_password_hash("$2b$12$otherhash".to_string());

        assert_eq!(user.password_hash, "$2b$12$otherhash");
        assert!(user.updated_at >= created);
    }

    #[test]
    fn test_display_name() {
        let user = sample_user();
        assert_eq!(user.display_name(), "Ada Lovelace");
    }

    #[test]
    fn test_password_hash_not_serialized() {
        let user = sample_user();
        let json = serde_json::to_value(&user).unwrap();

        assert!(json.get("password_hash").is_none());
        assert_eq!(json["email"], "a@x.com");
    }
}
