//! bcrypt-backed password hashing and verification

use crate::errors::{DomainError, DomainResult};

/// Password hashing service
///
/// bcrypt embeds a random salt in every digest, so hashing the same
/// input twice yields different outputs while both verify.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    /// bcrypt cost factor
    cost: u32,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self {
            cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl PasswordHasher {
    /// Create a hasher with the default cost
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a hasher with an explicit cost factor
    ///
    /// Tests use a low cost to keep suites fast; production uses the
    /// default.
    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }

    /// Hash a plaintext password
    pub fn hash(&self, plaintext: &str) -> DomainResult<String> {
        bcrypt::hash(plaintext, self.cost).map_err(|e| DomainError::Internal {
            message: format!("Password hashing failed: {}", e),
        })
    }

    /// Verify a plaintext password against a stored digest
    ///
    /// Runs bcrypt's own comparison path. Malformed stored digests
    /// verify as `false` rather than erroring, so a corrupted row can
    /// never authenticate (or crash) a login.
    pub fn verify(&self, plaintext: &str, stored_hash: &str) -> bool {
        bcrypt::verify(plaintext, stored_hash).unwrap_or(false)
    }
}
