//! Password hashing contract.

use crate::error::AppError;
use async_trait::async_trait;

/// One-way password hashing.
///
/// Implemented by [`crate::infrastructure::security::Argon2PasswordHasher`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    /// Hashes a plain-text password into a self-describing hash string.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if hashing fails.
    async fn hash(&self, password: &str) -> Result<String, AppError>;
}
