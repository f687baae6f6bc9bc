//! Handlers for the password reset workflow:
//! POST /api/v1/users/request-password-reset
//! POST /api/v1/users/verify-password-reset/{token}
//! PUT  /api/v1/users/reset-password

use actix_web::{web, HttpResponse};
use validator::Validate;

use um_core::repositories::account::AccountRepository;
use um_core::services::notification::Mailer;
use um_shared::types::response::ApiResponse;

use crate::dto::users::{PasswordResetRequest, ResetPasswordRequest};
use crate::handlers::{domain_error_response, validation_error_response};

use super::AppState;

/// Issues a reset token, stores it with its 1-hour window, and mails
/// the reset link
///
/// Succeeds immediately regardless of delivery outcome.
pub async fn request_password_reset<R, M>(
    state: web::Data<AppState<R, M>>,
    request: web::Json<PasswordResetRequest>,
) -> HttpResponse
where
    R: AccountRepository + 'static,
    M: Mailer + 'static,
{
    if let Err(errors) = request.validate() {
        return validation_error_response(&errors);
    }

    let request = request.into_inner();
    log::info!("Processing password reset request for {}", request.email);

    match state
        .identity_service
        .request_password_reset(&request.email)
        .await
    {
        Ok(()) => HttpResponse::Ok().json(ApiResponse::<()>::success(
            "Password reset requested. Check your email for the reset link.",
        )),
        Err(error) => {
            log::warn!("Password reset request failed: {}", error);
            domain_error_response(&error)
        }
    }
}

/// Pre-checks a mailed reset token before the client collects the new
/// password
///
/// Pure gate; nothing is mutated. An unknown token reads the same as an
/// expired one.
pub async fn verify_password_reset<R, M>(
    state: web::Data<AppState<R, M>>,
    path: web::Path<String>,
) -> HttpResponse
where
    R: AccountRepository + 'static,
    M: Mailer + 'static,
{
    let token = path.into_inner();

    match state.identity_service.verify_password_reset(&token).await {
        Ok(()) => HttpResponse::Ok().json(ApiResponse::<()>::success(
            "Reset token verified successfully.",
        )),
        Err(error) => {
            log::info!("Password reset pre-check rejected: {}", error);
            domain_error_response(&error)
        }
    }
}

/// Commits a password reset
///
/// The mailed token authorizes the commit and is consumed by it; the
/// same link cannot be redeemed twice.
pub async fn reset_password<R, M>(
    state: web::Data<AppState<R, M>>,
    request: web::Json<ResetPasswordRequest>,
) -> HttpResponse
where
    R: AccountRepository + 'static,
    M: Mailer + 'static,
{
    if let Err(errors) = request.validate() {
        return validation_error_response(&errors);
    }

    let request = request.into_inner();

    match state
        .identity_service
        .reset_password(&request.reset_token, &request.new_password)
        .await
    {
        Ok(()) => HttpResponse::Ok().json(ApiResponse::<()>::success(
            "Password reset is done successfully. Please login with the new password.",
        )),
        Err(error) => {
            log::info!("Password reset commit rejected: {}", error);
            domain_error_response(&error)
        }
    }
}
