//! Repository trait for user records.

use crate::domain::entities::{NewUserRecord, User, UserRecordChanges};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for user storage.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUserRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryUserRepository`] - Process-local store
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Inserts a user and returns it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::EmailAlreadyExists`] if the email is taken.
    /// Returns [`AppError::Internal`] on storage errors.
    async fn create(&self, record: NewUserRecord) -> Result<User, AppError>;

    /// Finds a user by id.
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError>;

    /// Finds a user by email, ignoring case.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// Lists all users ordered by id.
    async fn list(&self) -> Result<Vec<User>, AppError>;

    /// Overwrites a user's fields.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(User))` with the updated record
    /// - `Ok(None)` if no user has this id
    ///
    /// # Errors
    ///
    /// Returns [`AppError::EmailAlreadyExists`] if the new email belongs to another user.
    async fn update(
        &self,
        id: i64,
        changes: UserRecordChanges,
    ) -> Result<Option<User>, AppError>;

    /// Deletes a user. Returns `false` if no user had this id.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;

    /// Checks that the backing store is reachable.
    async fn health_check(&self) -> bool;
}
