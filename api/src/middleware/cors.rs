//! CORS middleware configuration for cross-origin requests.
//!
//! Driven by the `CORS_ORIGINS` allow-list. A literal `*` entry (the
//! development default) allows any origin but cannot be combined with
//! credentialed requests; an explicit origin list enables credentials
//! so browsers will send the session cookie.

use actix_cors::Cors;
use actix_web::http::{header, Method};

use um_shared::config::CorsConfig;

/// Creates a CORS middleware instance from configuration
pub fn create_cors(config: &CorsConfig) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec![
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::ORIGIN,
        ])
        .max_age(config.max_age);

    if config.allow_any_origin() {
        log::info!("Configuring CORS with a wildcard origin");
        cors = cors.allow_any_origin();
    } else {
        for origin in &config.allowed_origins {
            log::info!("Adding allowed origin: {}", origin);
            cors = cors.allowed_origin(origin);
        }
        cors = cors.supports_credentials();
    }

    cors
}
