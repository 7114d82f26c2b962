//! Core domain entities.
//!
//! Entities are plain data structures without business logic. Creation and
//! update inputs are separate structs:
//!
//! - [`User`] - A stored user account
//! - [`NewUser`], [`UserUpdate`] - What callers submit (plain-text password)
//! - [`NewUserRecord`], [`UserRecordChanges`] - What the repository persists
//!   (validated, password already hashed)

pub mod user;

pub use user::{NewUser, NewUserRecord, User, UserRecordChanges, UserUpdate};
