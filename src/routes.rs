//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET /health` - Health check (public)
//! - `/users/*`    - User API (Bearer token + scope required)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket
//! - **Authentication** - Bearer token with per-route scope checks
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::{auth, rate_limit, tracing};
use crate::state::AppState;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// The auth layer runs before the per-route scope checks, so an
/// unauthenticated request is rejected with 401 before any scope or
/// handler logic executes. Both route groups are rate limited; the
/// public group gets the more lenient limiter.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let users_router = api::routes::protected_routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer))
        .layer(rate_limit::secure_layer());

    let public_router = Router::new()
        .route("/health", get(health_handler))
        .layer(rate_limit::layer());

    let router = Router::new()
        .merge(public_router)
        .nest("/users", users_router)
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
