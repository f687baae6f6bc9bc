//! Domain error to HTTP response mapping
//!
//! One consistent table: Conflict 409, NotFound 404, Unauthorized 401,
//! expired/invalid tokens and validation failures 400, store and
//! internal faults 500. The body always carries the uniform envelope,
//! with the domain error's own message as the user-facing text.

use actix_web::HttpResponse;
use validator::ValidationErrors;

use um_core::errors::{AuthError, DomainError, TokenError};
use um_shared::types::response::ApiResponse;

/// Translate a domain error into the enveloped HTTP response
pub fn domain_error_response(error: &DomainError) -> HttpResponse {
    let body: ApiResponse<()> = ApiResponse::error(public_message(error));

    match error {
        DomainError::Auth(auth) => match auth {
            AuthError::EmailAlreadyRegistered => HttpResponse::Conflict().json(body),
            AuthError::UserNotFound => HttpResponse::NotFound().json(body),
            AuthError::InvalidCredentials => HttpResponse::Unauthorized().json(body),
            AuthError::PasswordResetExpired | AuthError::EmailVerificationExpired => {
                HttpResponse::BadRequest().json(body)
            }
        },
        DomainError::Token(token) => match token {
            TokenError::TokenExpired
            | TokenError::InvalidSignature
            | TokenError::InvalidClaims
            | TokenError::InvalidTokenFormat
            | TokenError::MissingClaim { .. } => HttpResponse::BadRequest().json(body),
            TokenError::TokenGenerationFailed => HttpResponse::InternalServerError().json(body),
        },
        DomainError::Validation { .. } => HttpResponse::BadRequest().json(body),
        DomainError::NotFound { .. } => HttpResponse::NotFound().json(body),
        DomainError::Unauthorized => HttpResponse::Unauthorized().json(body),
        DomainError::Database { .. } | DomainError::Internal { .. } => {
            HttpResponse::InternalServerError().json(body)
        }
    }
}

/// Build the 400 response for request-shape validation failures
pub fn validation_error_response(errors: &ValidationErrors) -> HttpResponse {
    let fields: Vec<String> = errors.field_errors().keys().map(|k| k.to_string()).collect();
    let message = format!("Invalid request data: {}", fields.join(", "));
    let body: ApiResponse<()> = ApiResponse::error(message);
    HttpResponse::BadRequest().json(body)
}

/// The message placed in the envelope
///
/// Store and internal faults keep their detail in the server log only.
fn public_message(error: &DomainError) -> String {
    match error {
        DomainError::Database { .. } | DomainError::Internal { .. } => {
            "Something went wrong. Please try again later.".to_string()
        }
        other => other.to_string(),
    }
}
