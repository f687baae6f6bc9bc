//! User route handlers
//!
//! This module contains all account-related endpoints:
//! - Registration and login
//! - Email verification (request and redeem)
//! - Password reset (request, pre-check, commit)
//! - Profile reads and partial updates

pub mod email_verification;
pub mod login;
pub mod password_reset;
pub mod profile;
pub mod register;

use std::sync::Arc;

use um_core::repositories::account::AccountRepository;
use um_core::services::identity::IdentityService;
use um_core::services::notification::Mailer;

/// Application state that holds shared services
pub struct AppState<R, M>
where
    R: AccountRepository,
    M: Mailer + 'static,
{
    pub identity_service: Arc<IdentityService<R, M>>,
}
