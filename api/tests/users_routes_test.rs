//! Route-level tests against the full app factory, with the in-memory
//! store and recording mailer behind the real handlers.

use std::sync::Arc;

use actix_web::http::{header, StatusCode};
use actix_web::{test, web};
use serde_json::{json, Value};

use um_api::app::create_app;
use um_api::routes::users::AppState;
use um_core::repositories::account::{AccountRepository, MockAccountRepository};
use um_core::services::identity::{IdentityService, IdentityServiceConfig};
use um_core::services::notification::{ComposerConfig, EmailComposer, MockMailer};
use um_core::services::password::PasswordHasher;
use um_core::services::token::{TokenService, TokenServiceConfig};
use um_shared::config::CorsConfig;

struct TestContext {
    state: web::Data<AppState<MockAccountRepository, MockMailer>>,
    repository: Arc<MockAccountRepository>,
}

fn test_context() -> TestContext {
    let repository = Arc::new(MockAccountRepository::new());
    let mailer = Arc::new(MockMailer::new());
    let token_service = Arc::new(TokenService::new(TokenServiceConfig::new("route-test-secret")));

    let identity_service = Arc::new(IdentityService::new(
        Arc::clone(&repository),
        mailer,
        token_service,
        PasswordHasher::with_cost(4),
        EmailComposer::new(ComposerConfig::default()),
        IdentityServiceConfig::default(),
    ));

    TestContext {
        state: web::Data::new(AppState { identity_service }),
        repository,
    }
}

fn register_payload(email: &str, password: &str) -> Value {
    json!({
        "email": email,
        "first_name": "Ada",
        "last_name": "Lovelace",
        "password": password,
    })
}

#[actix_web::test]
async fn test_register_returns_success_envelope() {
    let ctx = test_context();
    let app = test::init_service(create_app(ctx.state.clone(), &CorsConfig::default())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/users/register")
        .set_json(register_payload("a@x.com", "password1"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "User registered successfully.");
}

#[actix_web::test]
async fn test_duplicate_register_conflicts() {
    let ctx = test_context();
    let app = test::init_service(create_app(ctx.state.clone(), &CorsConfig::default())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/users/register")
        .set_json(register_payload("a@x.com", "password1"))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/users/register")
        .set_json(register_payload("a@x.com", "password2"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "User with this email already exists.");
}

#[actix_web::test]
async fn test_register_rejects_invalid_payload() {
    let ctx = test_context();
    let app = test::init_service(create_app(ctx.state.clone(), &CorsConfig::default())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/users/register")
        .set_json(register_payload("not-an-email", "short"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "error");
}

#[actix_web::test]
async fn test_login_error_matrix_and_cookie() {
    let ctx = test_context();
    let app = test::init_service(create_app(ctx.state.clone(), &CorsConfig::default())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/users/register")
        .set_json(register_payload("a@x.com", "password1"))
        .to_request();
    test::call_service(&app, req).await;

    // Unknown email
    let req = test::TestRequest::post()
        .uri("/api/v1/users/login")
        .set_json(json!({"email": "b@x.com", "password": "password1"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // Wrong password
    let req = test::TestRequest::post()
        .uri("/api/v1/users/login")
        .set_json(json!({"email": "a@x.com", "password": "wrong-password"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // Correct credentials: session cookie plus user id in the body
    let req = test::TestRequest::post()
        .uri("/api/v1/users/login")
        .set_json(json!({"email": "a@x.com", "password": "password1"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let set_cookie = resp
        .headers()
        .get(header::SET_COOKIE)
        .expect("login sets the session cookie")
        .to_str()
        .unwrap()
        .to_string();
    assert!(set_cookie.starts_with("access_token="));
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("Secure"));

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "success");
    assert!(body["data"]["user_id"].is_string());
}

#[actix_web::test]
async fn test_password_reset_flow_over_http() {
    let ctx = test_context();
    let app = test::init_service(create_app(ctx.state.clone(), &CorsConfig::default())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/users/register")
        .set_json(register_payload("a@x.com", "password1"))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/users/request-password-reset")
        .set_json(json!({"email": "a@x.com"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    // The mailed token is the one persisted on the metadata row
    let token = ctx
        .repository
        .find_by_email("a@x.com")
        .await
        .unwrap()
        .unwrap()
        .metadata
        .reset_password_token
        .expect("reset token persisted");

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/users/verify-password-reset/{}", token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::put()
        .uri("/api/v1/users/reset-password")
        .set_json(json!({"reset_token": token, "new_password": "password2"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    // Old credential rejected, new one accepted
    let req = test::TestRequest::post()
        .uri("/api/v1/users/login")
        .set_json(json!({"email": "a@x.com", "password": "password1"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::post()
        .uri("/api/v1/users/login")
        .set_json(json!({"email": "a@x.com", "password": "password2"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_verify_email_with_fabricated_token_is_rejected() {
    let ctx = test_context();
    let app = test::init_service(create_app(ctx.state.clone(), &CorsConfig::default())).await;

    let req = test::TestRequest::put()
        .uri("/api/v1/users/verify-email/fabricated-token")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "error");
    assert_eq!(
        body["message"],
        "Email verification expired. Please try again afresh."
    );
}

#[actix_web::test]
async fn test_get_user_by_id() {
    let ctx = test_context();
    let app = test::init_service(create_app(ctx.state.clone(), &CorsConfig::default())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/users/register")
        .set_json(register_payload("a@x.com", "password1"))
        .to_request();
    test::call_service(&app, req).await;

    let account = ctx.repository.find_by_email("a@x.com").await.unwrap().unwrap();

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/users/{}", account.user.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["email"], "a@x.com");
    assert!(body["data"].get("password_hash").is_none());

    // Missing id is a real 404
    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/users/{}", uuid::Uuid::new_v4()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_update_user_applies_patch_and_rejects_unknown_id() {
    let ctx = test_context();
    let app = test::init_service(create_app(ctx.state.clone(), &CorsConfig::default())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/users/register")
        .set_json(register_payload("a@x.com", "password1"))
        .to_request();
    test::call_service(&app, req).await;

    let account = ctx.repository.find_by_email("a@x.com").await.unwrap().unwrap();

    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/users/{}", account.user.id))
        .set_json(json!({"first_name": "Grace", "phone_number": "+61400000000"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let updated = ctx.repository.find_by_email("a@x.com").await.unwrap().unwrap();
    assert_eq!(updated.user.first_name, "Grace");
    assert_eq!(updated.metadata.phone_number.as_deref(), Some("+61400000000"));

    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/users/{}", uuid::Uuid::new_v4()))
        .set_json(json!({"first_name": "Nobody"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_health_endpoint() {
    let ctx = test_context();
    let app = test::init_service(create_app(ctx.state.clone(), &CorsConfig::default())).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");
}
