//! DTOs for user record endpoints.

use crate::domain::entities::User;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to create a new user.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    /// Display name (non-blank).
    #[validate(length(min = 1, max = 100, message = "Name must not be blank"))]
    pub name: String,

    /// Email address, used as an alternate lookup key.
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Optional age in years.
    #[validate(range(min = 0, max = 150, message = "Age out of range"))]
    pub age: Option<i32>,
}

/// Request to rename the user registered under an email address.
#[derive(Debug, Deserialize, Validate)]
pub struct RenameUserRequest {
    /// Email of the user to rename.
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// New display name (non-blank).
    #[validate(length(min = 1, max = 100, message = "Name must not be blank"))]
    pub name: String,
}

/// Query parameters accepted by the single-user lookup.
#[derive(Debug, Deserialize)]
pub struct GetUserParams {
    /// Calling platform identifier, recorded for request tracing only.
    pub platform: Option<String>,
}

/// JSON representation of a user record.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub age: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            age: user.age,
            created_at: user.created_at,
        }
    }
}
