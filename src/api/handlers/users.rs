//! Handlers for user management endpoints.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::api::dto::user::{CreateUserRequest, UpdateUserRequest, UserResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a user.
///
/// # Endpoint
///
/// `POST /users`
///
/// # Request Body
///
/// ```json
/// {
///   "name": "Ana",
///   "email": "ana@x.com",
///   "password": "p1",
///   "passwordConfirmation": "p1"
/// }
/// ```
///
/// # Errors
///
/// Returns 400 with code `10004` if `password` and `passwordConfirmation`
/// differ; the service is not called in that case.
/// Returns 400 if name, email or password is invalid.
/// Returns 409 if the email is already registered.
pub async fn create_user_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    tracing::debug!("Create user request");

    if !payload.is_password_matched() {
        return Err(AppError::password_not_matched());
    }

    let user = state.user_service.create(payload.into()).await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// Overwrites a user's name and email, and the password when supplied.
///
/// # Endpoint
///
/// `PUT /users/{id}`
///
/// # Errors
///
/// Returns 404 if the user does not exist.
/// Returns 400 if a field is invalid.
/// Returns 409 if the email belongs to another user.
pub async fn update_user_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>, AppError> {
    tracing::debug!(user_id = id, "Update user request");

    let user = state.user_service.update(id, payload.into()).await?;

    Ok(Json(user.into()))
}

/// Deletes a user.
///
/// # Endpoint
///
/// `DELETE /users/{id}`
///
/// # Errors
///
/// Returns 404 if the user does not exist.
pub async fn delete_user_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state.user_service.delete_by_id(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Fetches one user.
///
/// # Endpoint
///
/// `GET /users/{id}`
///
/// # Errors
///
/// Returns 404 if the user does not exist.
pub async fn get_user_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<UserResponse>, AppError> {
    let user = state.user_service.get_by_id(id).await?;
    Ok(Json(user.into()))
}

/// Lists every user, ordered by id.
///
/// # Endpoint
///
/// `GET /users`
pub async fn list_users_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    let users = state.user_service.get_all().await?;

    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}
