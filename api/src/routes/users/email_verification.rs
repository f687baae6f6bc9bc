//! Handlers for the email verification workflow:
//! POST /api/v1/users/request-email-verify/{email}
//! PUT  /api/v1/users/verify-email/{token}

use actix_web::{web, HttpResponse};

use um_core::repositories::account::AccountRepository;
use um_core::services::notification::Mailer;
use um_shared::types::response::ApiResponse;
use um_shared::utils::validation::is_valid_email;

use crate::handlers::domain_error_response;

use super::AppState;

/// Issues a verification token and mails the verification link
///
/// Returns success as soon as the token is stored; delivery happens in
/// the background and its outcome is not surfaced here.
pub async fn request_email_verify<R, M>(
    state: web::Data<AppState<R, M>>,
    path: web::Path<String>,
) -> HttpResponse
where
    R: AccountRepository + 'static,
    M: Mailer + 'static,
{
    let email = path.into_inner();
    if !is_valid_email(&email) {
        return HttpResponse::BadRequest()
            .json(ApiResponse::<()>::error("Invalid email address."));
    }

    log::info!("Processing email verification request for {}", email);

    match state.identity_service.request_email_verification(&email).await {
        Ok(()) => HttpResponse::Ok().json(ApiResponse::<()>::success(
            "An email has been sent to verify your account. Please follow the instructions mentioned.",
        )),
        Err(error) => {
            log::warn!("Email verification request failed: {}", error);
            domain_error_response(&error)
        }
    }
}

/// Redeems a verification token
pub async fn verify_email<R, M>(
    state: web::Data<AppState<R, M>>,
    path: web::Path<String>,
) -> HttpResponse
where
    R: AccountRepository + 'static,
    M: Mailer + 'static,
{
    let token = path.into_inner();

    match state.identity_service.verify_email(&token).await {
        Ok(()) => {
            HttpResponse::Ok().json(ApiResponse::<()>::success("Email verified successfully."))
        }
        Err(error) => {
            log::info!("Email verification rejected: {}", error);
            domain_error_response(&error)
        }
    }
}
