//! Token claims for JWT-based session and action tokens.

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default session token expiration time (1 hour)
pub const SESSION_TOKEN_EXPIRY_MINUTES: i64 = 60;

/// Action token expiration time (1 hour), shared by the signed expiry
/// and the stored `reset_password_expires_at` window
pub const ACTION_TOKEN_EXPIRY_MINUTES: i64 = 60;

/// JWT issuer
pub const JWT_ISSUER: &str = "user-mngmt";

/// What a token authorizes its bearer to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenPurpose {
    /// Identifies an authenticated caller across requests
    Session,
    /// Authorizes marking an email address as verified
    EmailVerification,
    /// Authorizes overwriting the account password
    PasswordReset,
}

/// Claims structure for the JWT payload
///
/// Tokens are self-contained: validity is a function of the signature
/// and `exp` alone. Action tokens are additionally matched against the
/// value stored on the user's metadata row, which is what makes them
/// single-use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user id)
    pub sub: String,

    /// Email address of the subject
    pub email: String,

    /// Token purpose; absent on tokens minted before purposes existed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purpose: Option<TokenPurpose>,

    /// Issued at timestamp (seconds since epoch)
    pub iat: i64,

    /// Expiration timestamp (seconds since epoch)
    pub exp: i64,

    /// Issuer
    pub iss: String,

    /// JWT ID (unique identifier for the token)
    pub jti: String,
}

impl Claims {
    /// Creates claims with an explicit TTL
    ///
    /// Negative TTLs are allowed; they produce an already-expired token,
    /// which the expiry tests rely on.
    pub fn new(user_id: Uuid, email: String, purpose: TokenPurpose, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id.to_string(),
            email,
            purpose: Some(purpose),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
            iss: JWT_ISSUER.to_string(),
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// Creates claims for a session token
    pub fn new_session(user_id: Uuid, email: String, ttl_minutes: i64) -> Self {
        Self::new(
            user_id,
            email,
            TokenPurpose::Session,
            Duration::minutes(ttl_minutes),
        )
    }

    /// Creates claims for an action token (verification or reset)
    pub fn new_action(
        user_id: Uuid,
        email: String,
        purpose: TokenPurpose,
        ttl_minutes: i64,
    ) -> Self {
        Self::new(user_id, email, purpose, Duration::minutes(ttl_minutes))
    }

    /// Checks if the claims have expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }

    /// Gets the user ID from the claims
    pub fn user_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }
}
