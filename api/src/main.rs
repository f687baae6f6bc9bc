use std::sync::Arc;

use actix_web::{web, HttpServer};
use dotenvy::dotenv;
use log::info;

use um_api::app::create_app;
use um_api::routes::users::AppState;
use um_core::services::identity::{IdentityService, IdentityServiceConfig};
use um_core::services::notification::{ComposerConfig, EmailComposer};
use um_core::services::password::PasswordHasher;
use um_core::services::token::{TokenService, TokenServiceConfig};
use um_infra::database::{pool_for, PgAccountRepository};
use um_infra::email::create_mailer;
use um_shared::config::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    let config = AppConfig::from_env();

    // Initialize logger
    env_logger::init_from_env(
        env_logger::Env::new().default_filter_or(config.environment.default_log_filter()),
    );

    info!("Starting user management API server");
    if config.environment.is_production() && config.jwt.is_using_default_secret() {
        anyhow::bail!("JWT_SECRET_KEY must be provided in production");
    }

    // Database: shared pool from the process-wide registry, schema
    // migrated before the server accepts requests
    let pool = pool_for(&config.database).await?;
    pool.run_migrations().await?;
    let repository = Arc::new(PgAccountRepository::new(pool.get_pool().clone()));

    // Outbound email channel
    let mailer = Arc::new(create_mailer(&config.email));

    // Token service from the JWT configuration
    let token_config = TokenServiceConfig::new(config.jwt.secret.clone())
        .with_algorithm_name(&config.jwt.algorithm)
        .with_session_ttl_minutes(config.jwt.access_token_expiry_minutes);
    let token_service = Arc::new(TokenService::new(token_config));

    // Notification composition
    let support_email = if config.email.username.is_empty() {
        config.email.from_address.clone()
    } else {
        config.email.username.clone()
    };
    let composer = EmailComposer::new(ComposerConfig {
        app_name: config.server.app_name.clone(),
        public_url: config.server.public_url.clone(),
        support_email,
    });

    // The workflow engine every request handler goes through
    let identity_service = Arc::new(IdentityService::new(
        repository,
        mailer,
        token_service,
        PasswordHasher::new(),
        composer,
        IdentityServiceConfig::default(),
    ));

    let app_state = web::Data::new(AppState { identity_service });
    let cors_config = config.cors.clone();

    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    HttpServer::new(move || create_app(app_state.clone(), &cors_config))
        .bind(&bind_address)?
        .run()
        .await?;

    Ok(())
}
