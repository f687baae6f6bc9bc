//! Authentication session value object.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Result of a successful login
///
/// The HTTP layer delivers `access_token` to the caller as a secure,
/// http-only cookie; the body carries only the user id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    /// Id of the authenticated user
    pub user_id: Uuid,

    /// Signed session token
    pub access_token: String,

    /// Token lifetime in seconds
    pub expires_in: i64,
}

impl AuthSession {
    /// Creates a new session value
    pub fn new(user_id: Uuid, access_token: String, expires_in: i64) -> Self {
        Self {
            user_id,
            access_token,
            expires_in,
        }
    }
}
