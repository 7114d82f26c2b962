//! User entity and its creation/update inputs.

use chrono::{DateTime, Utc};

/// A stored user account.
///
/// `password_hash` holds an Argon2 PHC string. It never leaves the service
/// boundary: response DTOs are built without it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new User instance.
    pub fn new(
        id: i64,
        name: String,
        email: String,
        password_hash: String,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            email,
            password_hash,
            created_at,
            updated_at,
        }
    }
}

/// Input for creating a user, with the plain-text password.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Full replacement of a user's fields.
///
/// `password: None` keeps the stored hash.
#[derive(Debug, Clone)]
pub struct UserUpdate {
    pub name: String,
    pub email: String,
    pub password: Option<String>,
}

/// Validated, hashed user data handed to the repository on insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUserRecord {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

/// Validated changes handed to the repository on update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecordChanges {
    pub name: String,
    pub email: String,
    pub password_hash: Option<String>,
}
