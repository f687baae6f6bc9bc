//! # Infrastructure Layer
//!
//! Concrete implementations of the core crate's external boundaries:
//!
//! - **Database**: PostgreSQL account store using SQLx, with a
//!   process-wide connection-pool registry keyed by database name
//! - **Email**: SMTP delivery via lettre, plus a factory that routes to
//!   a logging mock for development

pub mod database;
pub mod email;

use thiserror::Error;

/// Infrastructure-level errors
#[derive(Error, Debug)]
pub enum InfrastructureError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Email transport error: {0}")]
    Email(String),
}
