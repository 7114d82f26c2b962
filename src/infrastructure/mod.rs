//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer.
//!
//! # Modules
//!
//! - [`persistence`] - PostgreSQL and in-memory user repositories
//! - [`security`] - Password hashing

pub mod persistence;
pub mod security;
