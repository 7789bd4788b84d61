//! Repository trait for user record data access.

use crate::domain::entities::{NewUser, User};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for user records.
///
/// Lookups return `Ok(None)` when no record matches; absence is a valid
/// outcome, not an error.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUserRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_user.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Inserts a new user record.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the email is already taken.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_user: NewUser) -> Result<User, AppError>;

    /// Finds a user by identifier.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(User))` if found
    /// - `Ok(None)` if not found
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError>;

    /// Finds a user by email address.
    ///
    /// Email is unique at the schema level, so at most one record can match.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// Persists a whole record with insert-or-update semantics.
    ///
    /// Runs inside a single transaction: an existing record with the same
    /// identifier is replaced, otherwise the record is inserted. Either all
    /// effects apply or none do.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the email would collide with
    /// another record. Returns [`AppError::Internal`] on database errors.
    async fn save(&self, user: User) -> Result<User, AppError>;

    /// Deletes a user by identifier.
    ///
    /// Returns `Ok(true)` if a record was removed, `Ok(false)` if no record
    /// matched. Deleting an absent identifier is not a fault.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;

    /// Counts all user records.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn count(&self) -> Result<i64, AppError>;
}
