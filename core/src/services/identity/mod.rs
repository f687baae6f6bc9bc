//! Identity workflow engine
//!
//! Orchestrates registration, login, email verification, and password
//! reset as explicit state transitions over the account store, using the
//! credential hasher and token service. Per user the derived states are
//! `Unregistered -> Registered(unverified) -> Registered(verified)`,
//! with an independent reset-pending substate while a live reset token
//! is stored.

mod config;
mod service;

#[cfg(test)]
mod tests;

pub use config::IdentityServiceConfig;
pub use service::{IdentityService, NewAccount, ProfileUpdate};
