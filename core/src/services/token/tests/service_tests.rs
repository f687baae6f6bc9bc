//! Tests for the token service

use chrono::Duration;
use uuid::Uuid;

use crate::domain::entities::token::TokenPurpose;
use crate::errors::{DomainError, TokenError};
use crate::services::token::{TokenService, TokenServiceConfig};

fn service_with_secret(secret: &str) -> TokenService {
    TokenService::new(TokenServiceConfig::new(secret))
}

#[test]
fn test_issue_and_verify_session_round_trip() {
    let service = service_with_secret("test-secret");
    let user_id = Uuid::new_v4();

    let (token, expires_in) = service.issue_session(user_id, "a@x.com").unwrap();
    assert_eq!(expires_in, 60 * 60);

    let claims = service.verify(&token).unwrap();
    assert_eq!(claims.user_id().unwrap(), user_id);
    assert_eq!(claims.email, "a@x.com");
    assert_eq!(claims.purpose, Some(TokenPurpose::Session));
}

#[test]
fn test_action_token_carries_purpose() {
    let service = service_with_secret("test-secret");
    let user_id = Uuid::new_v4();

    let token = service
        .issue_action(user_id, "a@x.com", TokenPurpose::PasswordReset)
        .unwrap();

    let claims = service.verify(&token).unwrap();
    assert_eq!(claims.purpose, Some(TokenPurpose::PasswordReset));
}

#[test]
fn test_already_expired_token_fails_with_expired() {
    let service = service_with_secret("test-secret");

    let token = service
        .issue_with_ttl(
            Uuid::new_v4(),
            "a@x.com",
            TokenPurpose::Session,
            Duration::seconds(-1),
        )
        .unwrap();

    let result = service.verify(&token);
    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::TokenExpired))
    ));
}

#[test]
fn test_wrong_secret_fails_with_invalid_signature() {
    let issuer = service_with_secret("secret-one");
    let verifier = service_with_secret("secret-two");

    let (token, _) = issuer.issue_session(Uuid::new_v4(), "a@x.com").unwrap();

    let result = verifier.verify(&token);
    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::InvalidSignature))
    ));
}

#[test]
fn test_malformed_token_fails_with_invalid_format() {
    let service = service_with_secret("test-secret");

    let result = service.verify("not.a.jwt");
    assert!(matches!(
        result,
        Err(DomainError::Token(
            TokenError::InvalidTokenFormat | TokenError::InvalidSignature
        ))
    ));

    let result = service.verify("garbage");
    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::InvalidTokenFormat))
    ));
}

#[test]
fn test_tokens_are_unique_per_issuance() {
    let service = service_with_secret("test-secret");
    let user_id = Uuid::new_v4();

    // Distinct jti claims make every issuance a distinct bearer value
    let first = service
        .issue_action(user_id, "a@x.com", TokenPurpose::EmailVerification)
        .unwrap();
    let second = service
        .issue_action(user_id, "a@x.com", TokenPurpose::EmailVerification)
        .unwrap();

    assert_ne!(first, second);
}
