//! Application error type and its HTTP mapping.
//!
//! Every failure a request can hit is one [`AppError`] variant carrying a
//! stable error `code` and a human-readable `message`. Handlers return
//! `Result<_, AppError>` and axum turns the error into a JSON body through
//! [`IntoResponse`].
//!
//! # Status Mapping
//!
//! | Variant                 | Status |
//! |-------------------------|--------|
//! | `EmailAlreadyExists`    | 409    |
//! | `EmailValidation`       | 400    |
//! | `PasswordValidation`    | 400    |
//! | `NameValidation`        | 400    |
//! | `UserNotExist`          | 404    |
//! | `Internal`              | 500    |
//!
//! # Response Body
//!
//! ```json
//! { "code": "10004", "message": "password not matched" }
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::utils::db_error::is_unique_violation_on_email;

pub const INTERNAL_CODE: &str = "10000";
pub const EMAIL_ALREADY_EXISTS_CODE: &str = "10001";
pub const EMAIL_VALIDATION_CODE: &str = "10002";
pub const NAME_VALIDATION_CODE: &str = "10003";
pub const PASSWORD_VALIDATION_CODE: &str = "10004";
pub const USER_NOT_EXIST_CODE: &str = "10005";

/// JSON error body returned for every failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    EmailAlreadyExists { code: String, message: String },

    #[error("{message}")]
    EmailValidation { code: String, message: String },

    #[error("{message}")]
    PasswordValidation { code: String, message: String },

    #[error("{message}")]
    NameValidation { code: String, message: String },

    #[error("{message}")]
    UserNotExist { code: String, message: String },

    /// Store or infrastructure failure. The message is logged, never sent.
    #[error("internal error: {message}")]
    Internal { message: String },
}

impl AppError {
    pub fn email_already_exists(email: &str) -> Self {
        Self::EmailAlreadyExists {
            code: EMAIL_ALREADY_EXISTS_CODE.to_string(),
            message: format!("email {email} already exists"),
        }
    }

    pub fn email_validation(message: impl Into<String>) -> Self {
        Self::EmailValidation {
            code: EMAIL_VALIDATION_CODE.to_string(),
            message: message.into(),
        }
    }

    pub fn password_validation(message: impl Into<String>) -> Self {
        Self::PasswordValidation {
            code: PASSWORD_VALIDATION_CODE.to_string(),
            message: message.into(),
        }
    }

    /// Raised by the create handler when `password != passwordConfirmation`.
    pub fn password_not_matched() -> Self {
        Self::password_validation("password not matched")
    }

    pub fn name_validation(message: impl Into<String>) -> Self {
        Self::NameValidation {
            code: NAME_VALIDATION_CODE.to_string(),
            message: message.into(),
        }
    }

    pub fn user_not_exist(id: i64) -> Self {
        Self::UserNotExist {
            code: USER_NOT_EXIST_CODE.to_string(),
            message: format!("user with id {id} does not exist"),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// HTTP status this error is reported with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::EmailAlreadyExists { .. } => StatusCode::CONFLICT,
            Self::EmailValidation { .. }
            | Self::PasswordValidation { .. }
            | Self::NameValidation { .. } => StatusCode::BAD_REQUEST,
            Self::UserNotExist { .. } => StatusCode::NOT_FOUND,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing body. Internal errors get a generic message.
    pub fn to_error_response(&self) -> ErrorResponse {
        match self {
            Self::EmailAlreadyExists { code, message }
            | Self::EmailValidation { code, message }
            | Self::PasswordValidation { code, message }
            | Self::NameValidation { code, message }
            | Self::UserNotExist { code, message } => ErrorResponse {
                code: code.clone(),
                message: message.clone(),
            },
            Self::Internal { .. } => ErrorResponse {
                code: INTERNAL_CODE.to_string(),
                message: "internal server error".to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if let Self::Internal { message } = &self {
            tracing::error!(error = %message, "Request failed with internal error");
        } else {
            tracing::debug!(status = %status, error = %self, "Request rejected");
        }

        (status, Json(self.to_error_response())).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if is_unique_violation_on_email(&e) {
            return Self::EmailAlreadyExists {
                code: EMAIL_ALREADY_EXISTS_CODE.to_string(),
                message: "email already exists".to_string(),
            };
        }

        Self::internal(format!("database error: {e}"))
    }
}
