#![allow(dead_code)]

use sqlx::PgPool;
use std::sync::Arc;
use user_directory::application::services::auth_service::hash_token;
use user_directory::application::services::{AuthService, UserService};
use user_directory::infrastructure::persistence::{PgTokenRepository, PgUserRepository};
use user_directory::state::AppState;

/// HMAC key shared by test state and token seeding helpers.
pub const TEST_SIGNING_SECRET: &str = "test-signing-secret";

pub async fn insert_user(pool: &PgPool, email: &str, name: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO users (email, name) VALUES ($1, $2) RETURNING id")
        .bind(email)
        .bind(name)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn insert_user_with_age(pool: &PgPool, email: &str, name: &str, age: i32) -> i64 {
    sqlx::query_scalar("INSERT INTO users (email, name, age) VALUES ($1, $2, $3) RETURNING id")
        .bind(email)
        .bind(name)
        .bind(age)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn count_users(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn fetch_user_name(pool: &PgPool, id: i64) -> String {
    sqlx::query_scalar("SELECT name FROM users WHERE id = $1")
        .bind(id)
        .fetch_one(pool)
        .await
        .unwrap()
}

/// Seeds an API token and returns the raw value to present as a bearer.
pub async fn insert_token(pool: &PgPool, name: &str, raw_token: &str, scopes: &[&str]) {
    let token_hash = hash_token(TEST_SIGNING_SECRET, raw_token);
    let scopes: Vec<String> = scopes.iter().map(|s| s.to_string()).collect();

    sqlx::query("INSERT INTO api_tokens (name, token_hash, scopes) VALUES ($1, $2, $3)")
        .bind(name)
        .bind(token_hash)
        .bind(scopes)
        .execute(pool)
        .await
        .unwrap();
}

pub async fn revoke_all_tokens(pool: &PgPool) {
    sqlx::query("UPDATE api_tokens SET revoked_at = NOW()")
        .execute(pool)
        .await
        .unwrap();
}

pub fn create_test_state(pool: PgPool) -> AppState {
    let pool = Arc::new(pool);

    let user_repo = Arc::new(PgUserRepository::new(pool.clone()));
    let token_repo = Arc::new(PgTokenRepository::new(pool));

    let user_service = Arc::new(UserService::new(user_repo));
    let auth_service = Arc::new(AuthService::new(
        token_repo,
        TEST_SIGNING_SECRET.to_string(),
    ));

    AppState::new(user_service, auth_service)
}
