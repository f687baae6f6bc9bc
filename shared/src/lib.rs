//! Shared utilities and common types for the user management server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types sourced from the environment
//! - The uniform API response envelope
//! - Validation helpers (email format, field lengths)

pub mod config;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, CorsConfig, DatabaseConfig, EmailConfig, Environment, JwtConfig, ServerConfig,
};
pub use types::response::{ApiResponse, ResponseStatus};
pub use utils::validation;
