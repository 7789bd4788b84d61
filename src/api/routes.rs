//! User API route configuration.
//!
//! All user endpoints require Bearer token authentication via
//! [`crate::api::middleware::auth`]; reads and writes additionally require
//! the matching scope.

use crate::api::handlers::{
    create_user_handler, delete_user_handler, get_user_by_email_handler, get_user_handler,
    rename_user_handler,
};
use crate::api::middleware::auth;
use crate::state::AppState;
use axum::{
    Router, middleware,
    routing::{delete, get, post},
};

/// User routes grouped by required scope.
///
/// # Endpoints
///
/// - `GET    /{id}`             - Fetch a user by identifier (`users:read`)
/// - `GET    /by-email/{email}` - Fetch a user by email (`users:read`)
/// - `POST   /`                 - Create a user (`users:write`)
/// - `POST   /rename`           - Rename a user by email (`users:write`)
/// - `DELETE /{id}`             - Delete a user (`users:write`)
///
/// Bearer authentication itself is layered on by the caller, see
/// [`crate::routes::app_router`].
pub fn protected_routes() -> Router<AppState> {
    let read_routes = Router::new()
        .route("/{id}", get(get_user_handler))
        .route("/by-email/{email}", get(get_user_by_email_handler))
        .route_layer(middleware::from_fn(auth::require_read));

    let write_routes = Router::new()
        .route("/", post(create_user_handler))
        .route("/rename", post(rename_user_handler))
        .route("/{id}", delete(delete_user_handler))
        .route_layer(middleware::from_fn(auth::require_write));

    Router::new().merge(read_routes).merge(write_routes)
}
