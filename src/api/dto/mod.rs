//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization. Request bodies use camelCase
//! field names.

pub mod health;
pub mod user;

pub use crate::error::ErrorResponse;
pub use user::{CreateUserRequest, UpdateUserRequest, UserResponse};
