//! Application factory
//!
//! Builds the Actix-web application with all routes and middleware
//! wired against whatever store and mailer implementations the caller
//! provides; production wires PostgreSQL + SMTP, tests wire mocks.

use actix_web::{middleware::Logger, web, App, HttpResponse};

use um_core::repositories::account::AccountRepository;
use um_core::services::notification::Mailer;
use um_shared::config::CorsConfig;
use um_shared::types::response::ApiResponse;

use crate::middleware::cors::create_cors;
use crate::routes::users::{
    email_verification::{request_email_verify, verify_email},
    login::login,
    password_reset::{request_password_reset, reset_password, verify_password_reset},
    profile::{get_user, update_user},
    register::register,
    AppState,
};

/// Create and configure the application with all dependencies
pub fn create_app<R, M>(
    app_state: web::Data<AppState<R, M>>,
    cors_config: &CorsConfig,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    R: AccountRepository + 'static,
    M: Mailer + 'static,
{
    let cors = create_cors(cors_config);

    App::new()
        // Add application state
        .app_data(app_state)
        // Add middleware
        .wrap(Logger::default())
        .wrap(cors)
        // Health check endpoint
        .route("/health", web::get().to(health_check))
        // API v1 routes
        .service(
            web::scope("/api/v1").service(
                web::scope("/users")
                    .route("/register", web::post().to(register::<R, M>))
                    .route("/login", web::post().to(login::<R, M>))
                    .route(
                        "/request-email-verify/{email}",
                        web::post().to(request_email_verify::<R, M>),
                    )
                    .route("/verify-email/{token}", web::put().to(verify_email::<R, M>))
                    .route(
                        "/request-password-reset",
                        web::post().to(request_password_reset::<R, M>),
                    )
                    .route(
                        "/verify-password-reset/{token}",
                        web::post().to(verify_password_reset::<R, M>),
                    )
                    .route("/reset-password", web::put().to(reset_password::<R, M>))
                    .route("/{user_id}", web::get().to(get_user::<R, M>))
                    .route("/{user_id}", web::put().to(update_user::<R, M>)),
            ),
        )
        // Default 404 handler
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "user-mngmt-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::<()>::error(
        "The requested resource was not found.",
    ))
}
