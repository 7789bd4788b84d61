mod common;

use axum::{Router, middleware};
use axum_test::TestServer;
use serde_json::json;
use sqlx::PgPool;
use user_directory::api::middleware::auth;
use user_directory::api::routes::protected_routes;

/// Build a test server with the real user routes behind the bearer auth
/// layer, exactly as `app_router` nests them (minus rate limiting).
fn make_server(pool: PgPool) -> TestServer {
    let state = common::create_test_state(pool);
    let app = Router::new()
        .nest(
            "/users",
            protected_routes()
                .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer)),
        )
        .with_state(state);
    TestServer::new(app).unwrap()
}

#[sqlx::test]
async fn test_missing_bearer_is_401(pool: PgPool) {
    let id = common::insert_user(&pool, "alice@example.com", "Alice").await;

    let server = make_server(pool);
    let response = server.get(&format!("/users/{id}")).await;

    response.assert_status_unauthorized();
    assert_eq!(response.header("www-authenticate"), "Bearer");
}

#[sqlx::test]
async fn test_invalid_token_is_401(pool: PgPool) {
    let server = make_server(pool);
    let response = server
        .get("/users/1")
        .add_header("Authorization", "Bearer no-such-token")
        .await;

    response.assert_status_unauthorized();
}

#[sqlx::test]
async fn test_revoked_token_is_401(pool: PgPool) {
    common::insert_token(&pool, "ci", "revoked-token", &["users:read"]).await;
    common::revoke_all_tokens(&pool).await;

    let server = make_server(pool);
    let response = server
        .get("/users/1")
        .add_header("Authorization", "Bearer revoked-token")
        .await;

    response.assert_status_unauthorized();
}

#[sqlx::test]
async fn test_read_scope_allows_get(pool: PgPool) {
    let id = common::insert_user(&pool, "alice@example.com", "Alice").await;
    common::insert_token(&pool, "reader", "read-token", &["users:read"]).await;

    let server = make_server(pool);
    let response = server
        .get(&format!("/users/{id}"))
        .add_header("Authorization", "Bearer read-token")
        .await;

    response.assert_status_ok();
}

#[sqlx::test]
async fn test_read_only_token_on_write_route_is_403(pool: PgPool) {
    common::insert_token(&pool, "reader", "read-token", &["users:read"]).await;

    let server = make_server(pool.clone());
    let response = server
        .post("/users")
        .add_header("Authorization", "Bearer read-token")
        .json(&json!({ "name": "Carol", "email": "carol@example.com" }))
        .await;

    response.assert_status_forbidden();

    let body = response.json::<serde_json::Value>();
    assert_eq!(body["error"]["code"], "forbidden");

    // Rejected before the handler ran; nothing was persisted.
    assert_eq!(common::count_users(&pool).await, 0);
}

#[sqlx::test]
async fn test_write_scope_allows_create(pool: PgPool) {
    common::insert_token(&pool, "writer", "write-token", &["users:read", "users:write"]).await;

    let server = make_server(pool);
    let response = server
        .post("/users")
        .add_header("Authorization", "Bearer write-token")
        .json(&json!({ "name": "Carol", "email": "carol@example.com" }))
        .await;

    response.assert_status(axum::http::StatusCode::CREATED);
}

#[sqlx::test]
async fn test_write_scope_alone_cannot_read(pool: PgPool) {
    let id = common::insert_user(&pool, "alice@example.com", "Alice").await;
    common::insert_token(&pool, "writer", "write-token", &["users:write"]).await;

    let server = make_server(pool);
    let response = server
        .get(&format!("/users/{id}"))
        .add_header("Authorization", "Bearer write-token")
        .await;

    response.assert_status_forbidden();
}
