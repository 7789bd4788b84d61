//! Handlers for user record endpoints.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::user::{CreateUserRequest, GetUserParams, RenameUserRequest, UserResponse};
use crate::domain::entities::NewUser;
use crate::error::AppError;
use crate::state::AppState;

/// Retrieves a user by identifier.
///
/// # Endpoint
///
/// `GET /users/{id}?platform=<string>`
///
/// The optional `platform` query value identifies the calling client and
/// is recorded on the request span.
///
/// # Errors
///
/// Returns 404 Not Found if no user matches the identifier.
pub async fn get_user_handler(
    Path(id): Path<i64>,
    Query(params): Query<GetUserParams>,
    State(state): State<AppState>,
) -> Result<Json<UserResponse>, AppError> {
    if let Some(platform) = &params.platform {
        tracing::debug!(platform = %platform, id, "User lookup");
    }

    let user = state.user_service.get_user(id).await?;

    Ok(Json(user.into()))
}

/// Retrieves a user by email address.
///
/// # Endpoint
///
/// `GET /users/by-email/{email}`
///
/// # Errors
///
/// Returns 404 Not Found if no user is registered under the email.
pub async fn get_user_by_email_handler(
    Path(email): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<UserResponse>, AppError> {
    let user = state.user_service.get_user_by_email(&email).await?;

    Ok(Json(user.into()))
}

/// Creates a new user record.
///
/// # Endpoint
///
/// `POST /users`
///
/// # Request Body
///
/// ```json
/// {
///   "name": "Alice",
///   "email": "alice@example.com",
///   "age": 30
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if validation fails; nothing is persisted.
/// Returns 409 Conflict if the email is already registered.
pub async fn create_user_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    payload.validate()?;

    let user = state
        .user_service
        .create_user(NewUser {
            email: payload.email,
            name: payload.name,
            age: payload.age,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// Renames the user registered under an email address.
///
/// # Endpoint
///
/// `POST /users/rename`
///
/// # Request Body
///
/// ```json
/// {
///   "email": "alice@example.com",
///   "name": "Alicia"
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if validation fails.
/// Returns 404 Not Found if no user matches the email; no save occurs.
pub async fn rename_user_handler(
    State(state): State<AppState>,
    Json(payload): Json<RenameUserRequest>,
) -> Result<Json<UserResponse>, AppError> {
    payload.validate()?;

    let user = state
        .user_service
        .rename_user(&payload.email, &payload.name)
        .await?;

    Ok(Json(user.into()))
}

/// Deletes a user by identifier.
///
/// # Endpoint
///
/// `DELETE /users/{id}`
///
/// # Errors
///
/// Returns 404 Not Found if no user matches the identifier, including a
/// repeated delete of the same identifier.
pub async fn delete_user_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state.user_service.delete_user(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
