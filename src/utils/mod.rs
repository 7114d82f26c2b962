//! Helper functions used across the application.
//!
//! - [`db_error`] - Classification of database errors

pub mod db_error;
