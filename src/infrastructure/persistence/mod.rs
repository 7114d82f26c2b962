//! User repository implementations.
//!
//! - [`PgUserRepository`] - PostgreSQL storage via SQLx
//! - [`InMemoryUserRepository`] - Process-local storage, used when no database
//!   is configured

pub mod memory_user_repository;
pub mod pg_user_repository;

pub use memory_user_repository::InMemoryUserRepository;
pub use pg_user_repository::PgUserRepository;
