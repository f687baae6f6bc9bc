//! Handler for POST /api/v1/users/register

use actix_web::{web, HttpResponse};
use validator::Validate;

use um_core::repositories::account::AccountRepository;
use um_core::services::identity::NewAccount;
use um_core::services::notification::Mailer;
use um_shared::types::response::ApiResponse;

use crate::dto::users::RegisterRequest;
use crate::handlers::{domain_error_response, validation_error_response};

use super::AppState;

/// Registers a new account
///
/// # Request Body
///
/// ```json
/// {
///     "email": "a@x.com",
///     "first_name": "Ada",
///     "last_name": "Lovelace",
///     "password": "at least 8 chars",
///     "phone_number": "+61400000000"
/// }
/// ```
///
/// # Responses
///
/// * `200` - registered; no token is issued here
/// * `400` - request failed validation
/// * `409` - email already registered
pub async fn register<R, M>(
    state: web::Data<AppState<R, M>>,
    request: web::Json<RegisterRequest>,
) -> HttpResponse
where
    R: AccountRepository + 'static,
    M: Mailer + 'static,
{
    if let Err(errors) = request.validate() {
        log::warn!("Registration request failed validation");
        return validation_error_response(&errors);
    }

    let request = request.into_inner();
    log::info!("Processing registration for {}", request.email);

    let new_account = NewAccount {
        email: request.email,
        password: request.password,
        first_name: request.first_name,
        last_name: request.last_name,
        role: request.role,
        phone_number: request.phone_number,
        address: request.address,
    };

    match state.identity_service.register(new_account).await {
        Ok(()) => HttpResponse::Ok()
            .json(ApiResponse::<()>::success("User registered successfully.")),
        Err(error) => {
            log::warn!("Registration failed: {}", error);
            domain_error_response(&error)
        }
    }
}
