//! User record lookup, creation, and rename service.

use std::sync::Arc;

use crate::domain::entities::{NewUser, User};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;
use serde_json::json;

/// Service for managing user records.
///
/// Maps repository absence (`Ok(None)`) to [`AppError::NotFound`] at the
/// operation boundary, so handlers only deal with found records or typed
/// errors.
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    /// Creates a new user service.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Retrieves a user by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no user matches the identifier.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn get_user(&self, id: i64) -> Result<User, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found", json!({ "id": id })))
    }

    /// Retrieves a user by email address.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no user matches the email.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn get_user_by_email(&self, email: &str) -> Result<User, AppError> {
        self.repository
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::not_found("User not found", json!({ "email": email })))
    }

    /// Creates a new user record.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the email is already registered.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn create_user(&self, new_user: NewUser) -> Result<User, AppError> {
        self.repository.create(new_user).await
    }

    /// Renames the user registered under the given email.
    ///
    /// Fetches the record, produces a copy with the new display name, and
    /// persists it with exactly one save. When the lookup comes back empty
    /// no mutation happens at all.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no user matches the email.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn rename_user(&self, email: &str, new_name: &str) -> Result<User, AppError> {
        let user = self
            .repository
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::not_found("User not found", json!({ "email": email })))?;

        self.repository.save(user.with_name(new_name)).await
    }

    /// Deletes a user by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no user matched the identifier,
    /// so a repeated delete reports not-found rather than failing.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn delete_user(&self, id: i64) -> Result<(), AppError> {
        let deleted = self.repository.delete(id).await?;

        if !deleted {
            return Err(AppError::not_found("User not found", json!({ "id": id })));
        }

        Ok(())
    }

    /// Counts all user records. Used by the health check and admin CLI.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn count_users(&self) -> Result<i64, AppError> {
        self.repository.count().await
    }
}
