//! Handler for POST /api/v1/users/login

use actix_web::cookie::Cookie;
use actix_web::{web, HttpResponse};
use validator::Validate;

use um_core::repositories::account::AccountRepository;
use um_core::services::notification::Mailer;
use um_shared::types::response::ApiResponse;

use crate::dto::users::{LoginData, LoginRequest};
use crate::handlers::{domain_error_response, validation_error_response};

use super::AppState;

/// Name of the session cookie set on successful login
pub const ACCESS_TOKEN_COOKIE: &str = "access_token";

/// Authenticates credentials and starts a session
///
/// On success the signed session token travels back as a secure,
/// http-only cookie; the JSON body carries only the user id.
///
/// # Responses
///
/// * `200` - authenticated; `access_token` cookie set
/// * `401` - wrong password
/// * `404` - no account with this email
pub async fn login<R, M>(
    state: web::Data<AppState<R, M>>,
    request: web::Json<LoginRequest>,
) -> HttpResponse
where
    R: AccountRepository + 'static,
    M: Mailer + 'static,
{
    if let Err(errors) = request.validate() {
        return validation_error_response(&errors);
    }

    let request = request.into_inner();
    log::info!("Processing login for {}", request.email);

    match state
        .identity_service
        .login(&request.email, &request.password)
        .await
    {
        Ok(session) => {
            let cookie = Cookie::build(ACCESS_TOKEN_COOKIE, session.access_token.clone())
                .http_only(true)
                .secure(true)
                .path("/")
                .finish();

            HttpResponse::Ok().cookie(cookie).json(ApiResponse::success_with_data(
                "User logged in successfully.",
                LoginData {
                    user_id: session.user_id,
                },
            ))
        }
        Err(error) => {
            log::info!("Login failed for {}: {}", request.email, error);
            domain_error_response(&error)
        }
    }
}
