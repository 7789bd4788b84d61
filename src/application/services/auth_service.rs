//! Authentication service for API token validation.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::sync::Arc;

use crate::domain::repositories::TokenRepository;
use crate::error::AppError;
use serde_json::json;

type HmacSha256 = Hmac<Sha256>;

/// Scope required to read user records.
pub const SCOPE_USERS_READ: &str = "users:read";
/// Scope required to create, rename, or delete user records.
pub const SCOPE_USERS_WRITE: &str = "users:write";

/// Identity established for a request after successful authentication.
///
/// Re-evaluated from scratch on every request; nothing is retained
/// between calls.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub token_id: i64,
    pub token_name: String,
    pub scopes: Vec<String>,
}

impl AuthContext {
    /// Returns true if the authenticated caller holds the given scope.
    pub fn has_scope(&self, scope: &str) -> bool {
        self.scopes.iter().any(|s| s == scope)
    }
}

/// Hashes a raw token with HMAC-SHA256 using the server signing secret.
///
/// Returns a 64-character lowercase hex-encoded MAC. Shared between the
/// auth service and the admin CLI so issued tokens verify against the
/// same stored hash.
pub fn hash_token(signing_secret: &str, token: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(signing_secret.as_bytes())
        .expect("HMAC accepts any key length");
    mac.update(token.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Service for authenticating API requests via Bearer tokens.
///
/// Tokens are hashed with HMAC-SHA256 (keyed by `signing_secret`) before storage
/// and comparison. An attacker with read-only access to the database cannot verify
/// or forge tokens without the server-side secret.
pub struct AuthService<R: TokenRepository> {
    repository: Arc<R>,
    signing_secret: String,
}

impl<R: TokenRepository> AuthService<R> {
    /// Creates a new authentication service.
    ///
    /// # Arguments
    ///
    /// - `repository` - token repository for DB operations
    /// - `signing_secret` - HMAC key; must match the value used when tokens were created
    pub fn new(repository: Arc<R>, signing_secret: String) -> Self {
        Self {
            repository,
            signing_secret,
        }
    }

    /// Authenticates a raw token against stored credentials.
    ///
    /// On successful authentication, updates the `last_used` timestamp for
    /// monitoring and audit purposes, and returns the caller identity with
    /// its granted scopes.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if:
    /// - Token hash does not match any stored credentials
    /// - Token has been revoked
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn authenticate(&self, token: &str) -> Result<AuthContext, AppError> {
        let token_hash = hash_token(&self.signing_secret, token);

        let Some(api_token) = self.repository.find_active_by_hash(&token_hash).await? else {
            return Err(AppError::unauthorized(
                "Unauthorized",
                json!({"reason": "Invalid or revoked token"}),
            ));
        };

        let _ = self.repository.update_last_used(&token_hash).await;

        Ok(AuthContext {
            token_id: api_token.id,
            token_name: api_token.name,
            scopes: api_token.scopes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::{ApiToken, MockTokenRepository};
    use chrono::Utc;

    fn test_secret() -> String {
        "test-signing-secret".to_string()
    }

    fn test_token(id: i64, token_hash: &str, scopes: &[&str]) -> ApiToken {
        ApiToken {
            id,
            name: "test".to_string(),
            token_hash: token_hash.to_string(),
            scopes: scopes.iter().map(|s| s.to_string()).collect(),
            created_at: Utc::now(),
            revoked_at: None,
        }
    }

    #[tokio::test]
    async fn test_authenticate_success_returns_scopes() {
        let mut mock_repo = MockTokenRepository::new();

        let token = "valid-token";
        let expected_hash = hash_token(&test_secret(), token);
        let stored = test_token(3, &expected_hash, &[SCOPE_USERS_READ]);

        let hash_for_lookup = expected_hash.clone();
        mock_repo
            .expect_find_active_by_hash()
            .withf(move |hash| hash == hash_for_lookup)
            .times(1)
            .returning(move |_| Ok(Some(stored.clone())));

        mock_repo
            .expect_update_last_used()
            .times(1)
            .returning(|_| Ok(()));

        let service = AuthService::new(Arc::new(mock_repo), test_secret());

        let result = service.authenticate(token).await;

        assert!(result.is_ok());
        let ctx = result.unwrap();
        assert_eq!(ctx.token_id, 3);
        assert!(ctx.has_scope(SCOPE_USERS_READ));
        assert!(!ctx.has_scope(SCOPE_USERS_WRITE));
    }

    #[tokio::test]
    async fn test_authenticate_invalid_token() {
        let mut mock_repo = MockTokenRepository::new();

        mock_repo
            .expect_find_active_by_hash()
            .times(1)
            .returning(|_| Ok(None));

        let service = AuthService::new(Arc::new(mock_repo), test_secret());

        let result = service.authenticate("invalid-token").await;

        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), AppError::Unauthorized { .. }));
    }

    #[test]
    fn test_hash_token_consistency() {
        let hash1 = hash_token("secret", "test-token");
        let hash2 = hash_token("secret", "test-token");

        assert_eq!(hash1, hash2);
        assert_eq!(hash1.len(), 64);
    }

    #[test]
    fn test_hash_token_different_inputs() {
        assert_ne!(hash_token("secret", "token1"), hash_token("secret", "token2"));
    }

    #[test]
    fn test_hash_token_secret_matters() {
        assert_ne!(hash_token("secret-a", "token"), hash_token("secret-b", "token"));
    }
}
