//! Main token service implementation

use chrono::Duration;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::domain::entities::token::{Claims, TokenPurpose};
use crate::errors::{DomainError, DomainResult, TokenError};

use super::config::TokenServiceConfig;

/// Service for signing and verifying JWT tokens
///
/// Holds no record of issued tokens. Action-token single-use semantics
/// are the workflow engine's bookkeeping against the account store, not
/// this service's.
pub struct TokenService {
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    /// Creates a new token service from configuration
    pub fn new(config: TokenServiceConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        let mut validation = Validation::new(config.algorithm);
        validation.set_issuer(&[&config.issuer]);
        validation.validate_exp = true;
        // Expiry is `now < expires_at`, exactly; the default 60s
        // leeway would keep just-expired tokens alive
        validation.leeway = 0;

        Self {
            config,
            encoding_key,
            decoding_key,
            validation,
        }
    }

    /// Issues a session token for an authenticated user
    ///
    /// # Returns
    ///
    /// The signed token and its lifetime in seconds
    pub fn issue_session(&self, user_id: Uuid, email: &str) -> DomainResult<(String, i64)> {
        let claims = Claims::new_session(user_id, email.to_string(), self.config.session_ttl_minutes);
        let token = self.encode_jwt(&claims)?;
        Ok((token, self.config.session_ttl_minutes * 60))
    }

    /// Issues an action token for an out-of-band workflow step
    pub fn issue_action(
        &self,
        user_id: Uuid,
        email: &str,
        purpose: TokenPurpose,
    ) -> DomainResult<String> {
        let claims = Claims::new_action(
            user_id,
            email.to_string(),
            purpose,
            self.config.action_ttl_minutes,
        );
        self.encode_jwt(&claims)
    }

    /// Issues a token with an explicit TTL
    ///
    /// Negative TTLs produce an already-expired token; the expiry tests
    /// depend on that.
    pub fn issue_with_ttl(
        &self,
        user_id: Uuid,
        email: &str,
        purpose: TokenPurpose,
        ttl: Duration,
    ) -> DomainResult<String> {
        let claims = Claims::new(user_id, email.to_string(), purpose, ttl);
        self.encode_jwt(&claims)
    }

    /// Verifies a token and returns its claims
    ///
    /// # Errors
    ///
    /// * `TokenError::TokenExpired` - past its embedded expiry
    /// * `TokenError::InvalidSignature` - signed with a different secret
    /// * `TokenError::InvalidClaims` - issuer or claim set rejected
    /// * `TokenError::InvalidTokenFormat` - not a parseable JWT
    pub fn verify(&self, token: &str) -> DomainResult<Claims> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                use jsonwebtoken::errors::ErrorKind;
                let token_error = match e.kind() {
                    ErrorKind::ExpiredSignature => TokenError::TokenExpired,
                    ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                    ErrorKind::InvalidIssuer | ErrorKind::InvalidAudience => {
                        TokenError::InvalidClaims
                    }
                    ErrorKind::MissingRequiredClaim(claim) => TokenError::MissingClaim {
                        claim: claim.clone(),
                    },
                    _ => TokenError::InvalidTokenFormat,
                };
                DomainError::Token(token_error)
            })?;

        Ok(token_data.claims)
    }

    /// Session token lifetime in seconds
    pub fn session_ttl_seconds(&self) -> i64 {
        self.config.session_ttl_minutes * 60
    }

    /// Action token lifetime in minutes
    pub fn action_ttl_minutes(&self) -> i64 {
        self.config.action_ttl_minutes
    }

    /// Encodes claims into a JWT
    fn encode_jwt(&self, claims: &Claims) -> DomainResult<String> {
        let header = Header::new(self.config.algorithm);
        encode(&header, claims, &self.encoding_key)
            .map_err(|_| DomainError::Token(TokenError::TokenGenerationFailed))
    }
}
