//! Shared application state injected into handlers and middleware.

use std::sync::Arc;

use crate::application::services::{AuthService, UserService};
use crate::infrastructure::persistence::{PgTokenRepository, PgUserRepository};

/// Application state shared across all request handlers.
///
/// Services are wrapped in `Arc` so the state stays cheap to clone per
/// request.
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService<PgUserRepository>>,
    pub auth_service: Arc<AuthService<PgTokenRepository>>,
}

impl AppState {
    /// Creates application state from constructed services.
    pub fn new(
        user_service: Arc<UserService<PgUserRepository>>,
        auth_service: Arc<AuthService<PgTokenRepository>>,
    ) -> Self {
        Self {
            user_service,
            auth_service,
        }
    }
}
