mod common;

use axum::{
    Router,
    routing::{get, post},
};
use axum_test::TestServer;
use serde_json::json;
use sqlx::PgPool;
use user_directory::api::handlers::{
    create_user_handler, delete_user_handler, get_user_by_email_handler, get_user_handler,
    rename_user_handler,
};

/// Build a test server with the user routes wired directly, bypassing the
/// auth middleware. Auth behaviour is covered in `handler_auth.rs`.
fn make_server(pool: PgPool) -> TestServer {
    let state = common::create_test_state(pool);
    let app = Router::new()
        .route("/users", post(create_user_handler))
        .route("/users/rename", post(rename_user_handler))
        .route(
            "/users/{id}",
            get(get_user_handler).delete(delete_user_handler),
        )
        .route("/users/by-email/{email}", get(get_user_by_email_handler))
        .with_state(state);
    TestServer::new(app).unwrap()
}

// ─── GET ─────────────────────────────────────────────────────────────────────

#[sqlx::test]
async fn test_get_user_found(pool: PgPool) {
    let id = common::insert_user(&pool, "alice@example.com", "Alice").await;

    let server = make_server(pool);
    let response = server.get(&format!("/users/{id}")).await;

    response.assert_status_ok();

    let body = response.json::<serde_json::Value>();
    assert_eq!(body["id"], id);
    assert_eq!(body["email"], "alice@example.com");
    assert_eq!(body["name"], "Alice");
}

#[sqlx::test]
async fn test_get_user_accepts_platform_query(pool: PgPool) {
    let id = common::insert_user(&pool, "alice@example.com", "Alice").await;

    let server = make_server(pool);
    let response = server.get(&format!("/users/{id}?platform=ios")).await;

    response.assert_status_ok();
}

#[sqlx::test]
async fn test_get_user_absent_is_404(pool: PgPool) {
    let server = make_server(pool);
    let response = server.get("/users/9999").await;

    response.assert_status_not_found();

    let body = response.json::<serde_json::Value>();
    assert_eq!(body["error"]["code"], "not_found");
}

#[sqlx::test]
async fn test_get_user_by_email(pool: PgPool) {
    common::insert_user(&pool, "bob@example.com", "Bob").await;

    let server = make_server(pool);
    let response = server.get("/users/by-email/bob@example.com").await;

    response.assert_status_ok();

    let body = response.json::<serde_json::Value>();
    assert_eq!(body["name"], "Bob");
}

#[sqlx::test]
async fn test_get_user_by_email_absent_is_404(pool: PgPool) {
    let server = make_server(pool);
    let response = server.get("/users/by-email/ghost@example.com").await;

    response.assert_status_not_found();
}

// ─── POST (create) ───────────────────────────────────────────────────────────

#[sqlx::test]
async fn test_create_user_returns_201(pool: PgPool) {
    let server = make_server(pool.clone());
    let response = server
        .post("/users")
        .json(&json!({ "name": "Carol", "email": "carol@example.com", "age": 28 }))
        .await;

    response.assert_status(axum::http::StatusCode::CREATED);

    let body = response.json::<serde_json::Value>();
    assert_eq!(body["email"], "carol@example.com");
    assert_eq!(body["name"], "Carol");
    assert_eq!(body["age"], 28);
    assert!(body["id"].is_i64());

    assert_eq!(common::count_users(&pool).await, 1);
}

#[sqlx::test]
async fn test_create_user_invalid_email_persists_nothing(pool: PgPool) {
    let server = make_server(pool.clone());
    let response = server
        .post("/users")
        .json(&json!({ "name": "Carol", "email": "not-an-email" }))
        .await;

    response.assert_status_bad_request();

    let body = response.json::<serde_json::Value>();
    assert_eq!(body["error"]["code"], "validation_error");

    assert_eq!(common::count_users(&pool).await, 0);
}

#[sqlx::test]
async fn test_create_user_blank_name_rejected(pool: PgPool) {
    let server = make_server(pool.clone());
    let response = server
        .post("/users")
        .json(&json!({ "name": "", "email": "carol@example.com" }))
        .await;

    response.assert_status_bad_request();
    assert_eq!(common::count_users(&pool).await, 0);
}

#[sqlx::test]
async fn test_create_user_age_out_of_bounds_rejected(pool: PgPool) {
    let server = make_server(pool.clone());
    let response = server
        .post("/users")
        .json(&json!({ "name": "Carol", "email": "carol@example.com", "age": 200 }))
        .await;

    response.assert_status_bad_request();
    assert_eq!(common::count_users(&pool).await, 0);
}

#[sqlx::test]
async fn test_create_user_duplicate_email_conflicts(pool: PgPool) {
    common::insert_user(&pool, "carol@example.com", "Carol").await;

    let server = make_server(pool);
    let response = server
        .post("/users")
        .json(&json!({ "name": "Other", "email": "carol@example.com" }))
        .await;

    response.assert_status(axum::http::StatusCode::CONFLICT);
}

// ─── rename ──────────────────────────────────────────────────────────────────

#[sqlx::test]
async fn test_rename_user_changes_name_only(pool: PgPool) {
    let id = common::insert_user(&pool, "a@b.com", "Old").await;

    let server = make_server(pool.clone());
    let response = server
        .post("/users/rename")
        .json(&json!({ "email": "a@b.com", "name": "New" }))
        .await;

    response.assert_status_ok();

    let body = response.json::<serde_json::Value>();
    assert_eq!(body["id"], id);
    assert_eq!(body["email"], "a@b.com");
    assert_eq!(body["name"], "New");

    // The new name is persisted, not just echoed.
    assert_eq!(common::fetch_user_name(&pool, id).await, "New");
}

#[sqlx::test]
async fn test_rename_absent_email_is_404_and_no_mutation(pool: PgPool) {
    common::insert_user(&pool, "a@b.com", "Old").await;

    let server = make_server(pool.clone());
    let response = server
        .post("/users/rename")
        .json(&json!({ "email": "x@y.com", "name": "New" }))
        .await;

    response.assert_status_not_found();

    // The existing record is untouched.
    let name: String = sqlx::query_scalar("SELECT name FROM users WHERE email = 'a@b.com'")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(name, "Old");
}

#[sqlx::test]
async fn test_rename_blank_name_rejected(pool: PgPool) {
    common::insert_user(&pool, "a@b.com", "Old").await;

    let server = make_server(pool);
    let response = server
        .post("/users/rename")
        .json(&json!({ "email": "a@b.com", "name": "" }))
        .await;

    response.assert_status_bad_request();
}

// ─── DELETE ──────────────────────────────────────────────────────────────────

#[sqlx::test]
async fn test_delete_user_success(pool: PgPool) {
    let id = common::insert_user(&pool, "gone@example.com", "Gone").await;

    let server = make_server(pool.clone());
    let response = server.delete(&format!("/users/{id}")).await;

    response.assert_status(axum::http::StatusCode::NO_CONTENT);
    assert_eq!(common::count_users(&pool).await, 0);
}

#[sqlx::test]
async fn test_delete_user_twice_is_not_found_not_fault(pool: PgPool) {
    let id = common::insert_user(&pool, "gone@example.com", "Gone").await;

    let server = make_server(pool);

    // First delete succeeds.
    server
        .delete(&format!("/users/{id}"))
        .await
        .assert_status(axum::http::StatusCode::NO_CONTENT);

    // Second delete reports not-found, never a server fault.
    server
        .delete(&format!("/users/{id}"))
        .await
        .assert_status_not_found();
}
