//! Error type definitions for account and token operations.
//!
//! Messages are the user-facing strings returned in the response
//! envelope; the HTTP layer maps variants to status codes.

use thiserror::Error;

/// Account and credential lifecycle errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Duplicate email on registration
    #[error("User with this email already exists.")]
    EmailAlreadyRegistered,

    /// No user matches the lookup key
    #[error("User with this email does not exist.")]
    UserNotFound,

    /// Credential verification failed
    #[error("Invalid password.")]
    InvalidCredentials,

    /// Reset token not found or past its window. Worded identically for
    /// both cases so callers cannot probe token validity.
    #[error("Password reset expired. Please try again afresh.")]
    PasswordResetExpired,

    /// Verification token not found or past its window
    #[error("Email verification expired. Please try again afresh.")]
    EmailVerificationExpired,
}

/// Token signing and verification errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Token signature verification failed")]
    InvalidSignature,

    #[error("Invalid token claims")]
    InvalidClaims,

    #[error("Invalid token format")]
    InvalidTokenFormat,

    #[error("Token generation failed")]
    TokenGenerationFailed,

    #[error("Missing required claim: {claim}")]
    MissingClaim { claim: String },
}
