//! End-to-end exercise of the identity workflows against the in-memory
//! store: register, login before verification, failed verification with
//! a fabricated token, password reset, and credential rotation.

use std::sync::Arc;

use um_core::domain::entities::token::TokenPurpose;
use um_core::errors::{AuthError, DomainError};
use um_core::repositories::account::{AccountRepository, MockAccountRepository};
use um_core::services::identity::{IdentityService, IdentityServiceConfig, NewAccount};
use um_core::services::notification::{ComposerConfig, EmailComposer, MockMailer};
use um_core::services::password::PasswordHasher;
use um_core::services::token::{TokenService, TokenServiceConfig};

struct World {
    service: IdentityService<MockAccountRepository, MockMailer>,
    repository: Arc<MockAccountRepository>,
    token_service: Arc<TokenService>,
}

fn world() -> World {
    let repository = Arc::new(MockAccountRepository::new());
    let mailer = Arc::new(MockMailer::new());
    let token_service = Arc::new(TokenService::new(TokenServiceConfig::new(
        "integration-secret",
    )));

    let service = IdentityService::new(
        Arc::clone(&repository),
        mailer,
        Arc::clone(&token_service),
        PasswordHasher::with_cost(4),
        EmailComposer::new(ComposerConfig::default()),
        IdentityServiceConfig::default(),
    );

    World {
        service,
        repository,
        token_service,
    }
}

#[tokio::test]
async fn full_account_lifecycle() {
    let w = world();

    // Register a@x.com with pw1
    w.service
        .register(NewAccount {
            email: "a@x.com".to_string(),
            password: "pw1".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            role: None,
            phone_number: None,
            address: None,
        })
        .await
        .unwrap();

    // Login succeeds regardless of the (still unverified) email flag
    let session = w.service.login("a@x.com", "pw1").await.unwrap();
    let claims = w.token_service.verify(&session.access_token).unwrap();
    assert_eq!(claims.email, "a@x.com");
    assert_eq!(claims.purpose, Some(TokenPurpose::Session));

    // Verification with a fabricated token reads as expired
    let fabricated = w
        .token_service
        .issue_action(session.user_id, "a@x.com", TokenPurpose::EmailVerification)
        .unwrap();
    assert!(matches!(
        w.service.verify_email(&fabricated).await,
        Err(DomainError::Auth(AuthError::EmailVerificationExpired))
    ));

    // Reset the password through the mailed-token flow
    w.service.request_password_reset("a@x.com").await.unwrap();
    let reset_token = w
        .repository
        .find_by_email("a@x.com")
        .await
        .unwrap()
        .unwrap()
        .metadata
        .reset_password_token
        .unwrap();

    w.service.verify_password_reset(&reset_token).await.unwrap();
    w.service.reset_password(&reset_token, "pw2").await.unwrap();

    // New credential works, old one is dead
    assert!(w.service.login("a@x.com", "pw2").await.is_ok());
    assert!(matches!(
        w.service.login("a@x.com", "pw1").await,
        Err(DomainError::Auth(AuthError::InvalidCredentials))
    ));
}

#[tokio::test]
async fn verification_state_machine() {
    let w = world();

    w.service
        .register(NewAccount {
            email: "b@x.com".to_string(),
            password: "pw1".to_string(),
            first_name: "Grace".to_string(),
            last_name: "Hopper".to_string(),
            role: None,
            phone_number: None,
            address: None,
        })
        .await
        .unwrap();

    // Registered(unverified)
    let account = w.repository.find_by_email("b@x.com").await.unwrap().unwrap();
    assert!(!account.metadata.email_verified);

    // Request + redeem moves the account to Registered(verified)
    w.service.request_email_verification("b@x.com").await.unwrap();
    let token = w
        .repository
        .find_by_email("b@x.com")
        .await
        .unwrap()
        .unwrap()
        .metadata
        .email_verification_token
        .unwrap();
    w.service.verify_email(&token).await.unwrap();

    let account = w.repository.find_by_email("b@x.com").await.unwrap().unwrap();
    assert!(account.metadata.email_verified);
    assert!(account.metadata.email_verification_token.is_none());
}
