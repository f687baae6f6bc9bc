//! Handlers for profile reads and updates:
//! GET /api/v1/users/{user_id}
//! PUT /api/v1/users/{user_id}

use actix_web::{web, HttpResponse};
use uuid::Uuid;
use validator::Validate;

use um_core::repositories::account::AccountRepository;
use um_core::services::identity::ProfileUpdate;
use um_core::services::notification::Mailer;
use um_shared::types::response::ApiResponse;

use crate::dto::users::{UpdateUserRequest, UserView};
use crate::handlers::{domain_error_response, validation_error_response};

use super::AppState;

/// Fetches the joined account view for a user id
///
/// A missing id is a 404, not an empty success payload.
pub async fn get_user<R, M>(
    state: web::Data<AppState<R, M>>,
    path: web::Path<Uuid>,
) -> HttpResponse
where
    R: AccountRepository + 'static,
    M: Mailer + 'static,
{
    let user_id = path.into_inner();

    match state.identity_service.get_user(user_id).await {
        Ok(account) => HttpResponse::Ok().json(ApiResponse::success_with_data(
            "User data fetched successfully.",
            UserView::from(account),
        )),
        Err(error) => domain_error_response(&error),
    }
}

/// Applies a partial profile update across the user and metadata rows
pub async fn update_user<R, M>(
    state: web::Data<AppState<R, M>>,
    path: web::Path<Uuid>,
    request: web::Json<UpdateUserRequest>,
) -> HttpResponse
where
    R: AccountRepository + 'static,
    M: Mailer + 'static,
{
    if let Err(errors) = request.validate() {
        return validation_error_response(&errors);
    }

    let user_id = path.into_inner();
    let request = request.into_inner();

    let update = ProfileUpdate {
        email: request.email,
        first_name: request.first_name,
        last_name: request.last_name,
        role: request.role.map(Some),
        phone_number: request.phone_number.map(Some),
        address: request.address.map(Some),
        profile_picture: request.profile_picture.map(Some),
    };

    match state.identity_service.update_user(user_id, update).await {
        Ok(()) => {
            HttpResponse::Ok().json(ApiResponse::<()>::success("User info updated successfully."))
        }
        Err(error) => {
            log::warn!("Profile update failed for {}: {}", user_id, error);
            domain_error_response(&error)
        }
    }
}
