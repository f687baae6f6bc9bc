//! Tests for the mock account repository

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::domain::entities::{User, UserMetadata};
use crate::errors::{AuthError, DomainError};
use crate::repositories::account::{AccountRepository, MetadataPatch, MockAccountRepository, UserPatch};

fn sample_account(email: &str) -> (User, UserMetadata) {
    let user = User::new(
        email.to_string(),
        "Ada".to_string(),
        "Lovelace".to_string(),
        "$2b$12$fakehash".to_string(),
        None,
    );
    let metadata = UserMetadata::new(user.id, None, None);
    (user, metadata)
}

#[tokio::test]
async fn test_create_and_find_by_email() {
    let repo = MockAccountRepository::new();
    let (user, metadata) = sample_account("a@x.com");

    repo.create_account(user.clone(), metadata).await.unwrap();

    let found = repo.find_by_email("a@x.com").await.unwrap().unwrap();
    assert_eq!(found.user.id, user.id);
    assert!(!found.metadata.email_verified);

    assert!(repo.find_by_email("b@x.com").await.unwrap().is_none());
}

#[tokio::test]
async fn test_duplicate_email_rejected_without_partial_write() {
    let repo = MockAccountRepository::new();
    let (user, metadata) = sample_account("a@x.com");
    repo.create_account(user, metadata).await.unwrap();

    let (dup_user, dup_metadata) = sample_account("a@x.com");
    let result = repo.create_account(dup_user, dup_metadata).await;

    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::EmailAlreadyRegistered))
    ));
    assert_eq!(repo.account_count().await, 1);
}

#[tokio::test]
async fn test_update_user_partial_fields() {
    let repo = MockAccountRepository::new();
    let (user, metadata) = sample_account("a@x.com");
    let id = user.id;
    repo.create_account(user, metadata).await.unwrap();

    repo.update_user(
        id,
        UserPatch {
            first_name: Some("Grace".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let account = repo.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(account.user.first_name, "Grace");
    // Untouched fields stay put
    assert_eq!(account.user.last_name, "Lovelace");
    assert_eq!(account.user.email, "a@x.com");
}

#[tokio::test]
async fn test_update_missing_user_is_not_found() {
    let repo = MockAccountRepository::new();

    let result = repo.update_user(Uuid::new_v4(), UserPatch::default()).await;

    assert!(matches!(result, Err(DomainError::NotFound { .. })));
}

#[tokio::test]
async fn test_reset_token_lookup_filters_expiry() {
    let repo = MockAccountRepository::new();
    let (user, metadata) = sample_account("a@x.com");
    let id = user.id;
    repo.create_account(user, metadata).await.unwrap();

    repo.update_metadata(
        id,
        MetadataPatch {
            reset_password_token: Some(Some("live-token".to_string())),
            reset_password_expires_at: Some(Some(Utc::now() + Duration::hours(1))),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    assert!(repo
        .find_metadata_by_reset_token("live-token")
        .await
        .unwrap()
        .is_some());

    // Push the expiry into the past; the same token must now be invisible
    repo.update_metadata(
        id,
        MetadataPatch {
            reset_password_expires_at: Some(Some(Utc::now() - Duration::seconds(1))),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    assert!(repo
        .find_metadata_by_reset_token("live-token")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_verification_token_lookup_and_clear() {
    let repo = MockAccountRepository::new();
    let (user, metadata) = sample_account("a@x.com");
    let id = user.id;
    repo.create_account(user, metadata).await.unwrap();

    repo.update_metadata(
        id,
        MetadataPatch {
            email_verification_token: Some(Some("verify-token".to_string())),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let found = repo
        .find_metadata_by_verification_token("verify-token")
        .await
        .unwrap();
    assert_eq!(found.unwrap().user_id, id);

    repo.update_metadata(
        id,
        MetadataPatch {
            email_verified: Some(true),
            email_verification_token: Some(None),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    assert!(repo
        .find_metadata_by_verification_token("verify-token")
        .await
        .unwrap()
        .is_none());
}
