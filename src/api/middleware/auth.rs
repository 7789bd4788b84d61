//! Bearer token authentication and scope enforcement middleware.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;
use serde_json::json;

use crate::application::services::AuthContext;
use crate::application::services::auth_service::{SCOPE_USERS_READ, SCOPE_USERS_WRITE};
use crate::{error::AppError, state::AppState};

/// Authenticates requests using Bearer tokens from Authorization header.
///
/// # Header Format
///
/// ```text
/// Authorization: Bearer <token>
/// ```
///
/// # Authentication Flow
///
/// 1. Extract token from `Authorization` header
/// 2. Validate token hash against database
/// 3. Check if token is revoked
/// 4. Stash the resulting [`AuthContext`] in request extensions
/// 5. Continue to next middleware/handler
///
/// Every request is evaluated independently; no session state is kept.
///
/// # Errors
///
/// Returns `401 Unauthorized` if:
/// - Authorization header is missing
/// - Token format is invalid
/// - Token is not found or revoked
///
/// Adds `WWW-Authenticate: Bearer` header to 401 responses per RFC 6750.
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let AuthBearer(token) = AuthBearer::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| {
            AppError::unauthorized(
                "Unauthorized",
                json!({"reason": "Authorization header is missing or invalid"}),
            )
        })?;

    let ctx = st.auth_service.authenticate(&token).await?;

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(ctx);

    Ok(next.run(req).await)
}

/// Requires the `users:read` scope on the authenticated token.
///
/// Must run after [`layer`]; a request that reaches it without an
/// [`AuthContext`] is rejected as unauthenticated.
pub async fn require_read(req: Request, next: Next) -> Result<Response, AppError> {
    check_scope(req, next, SCOPE_USERS_READ).await
}

/// Requires the `users:write` scope on the authenticated token.
pub async fn require_write(req: Request, next: Next) -> Result<Response, AppError> {
    check_scope(req, next, SCOPE_USERS_WRITE).await
}

async fn check_scope(req: Request, next: Next, scope: &'static str) -> Result<Response, AppError> {
    let Some(ctx) = req.extensions().get::<AuthContext>() else {
        return Err(AppError::unauthorized(
            "Unauthorized",
            json!({"reason": "No authenticated identity"}),
        ));
    };

    if !ctx.has_scope(scope) {
        return Err(AppError::forbidden(
            "Insufficient scope",
            json!({ "required": scope, "granted": ctx.scopes }),
        ));
    }

    Ok(next.run(req).await)
}
