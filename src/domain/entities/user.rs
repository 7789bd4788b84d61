//! User entity for the directory.

use chrono::{DateTime, Utc};

/// A persisted user record.
///
/// The identifier is assigned by the database on insert and never changes.
/// Email doubles as an alternate lookup key and is unique across records.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub age: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Creates a new User instance.
    pub fn new(
        id: i64,
        email: String,
        name: String,
        age: Option<i32>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            email,
            name,
            age,
            created_at,
        }
    }

    /// Returns a copy of the record with a new display name.
    ///
    /// Identifier and email are carried over unchanged; rename persists
    /// the whole record back through the repository.
    pub fn with_name(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self.clone()
        }
    }
}

/// Input data for creating a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub name: String,
    pub age: Option<i32>,
}
