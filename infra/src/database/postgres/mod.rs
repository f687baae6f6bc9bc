//! PostgreSQL repository implementations.

pub mod account_repository_impl;

pub use account_repository_impl::PgAccountRepository;
