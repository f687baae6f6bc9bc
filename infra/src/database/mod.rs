//! Database module - PostgreSQL implementations using SQLx
//!
//! This module provides the database access layer:
//! - Connection pool management and health checks
//! - A process-wide pool registry keyed by logical database name
//! - The account repository implementation
//! - Schema migrations

pub mod connection;
pub mod postgres;
pub mod registry;

// Re-export commonly used types
pub use connection::{DatabasePool, PoolStatistics};
pub use postgres::PgAccountRepository;
pub use registry::pool_for;
