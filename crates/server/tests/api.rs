//! End-to-end API tests over an in-memory database.
//!
//! These drive the full router (auth gate included) without binding a
//! listener, so they need no external services.

#![allow(clippy::unwrap_used)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode, header};
use secrecy::SecretString;
use serde_json::{Value, json};
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt;

use minimart_server::config::ServerConfig;
use minimart_server::state::AppState;
use minimart_server::{db, routes};

async fn test_state() -> AppState {
    // A single connection keeps every query on the same in-memory database.
    let pool: SqlitePool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();

    db::MIGRATOR.run(&pool).await.unwrap();

    let config = ServerConfig {
        database_url: SecretString::from("sqlite::memory:"),
        host: "127.0.0.1".parse().unwrap(),
        port: 0,
        token_secret: SecretString::from("an-adequately-long-test-signing-secret"),
        assets_dir: "assets".into(),
    };

    AppState::new(config, pool)
}

fn app(state: &AppState) -> Router {
    routes::routes().with_state(state.clone())
}

async fn send_json(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    app.clone().oneshot(request).await.unwrap()
}

async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn register_body(nickname: &str, email: &str, password: &str, confirm: &str) -> Value {
    json!({
        "nickname": nickname,
        "email": email,
        "password": password,
        "confirmPassword": confirm,
    })
}

async fn register(app: &Router, nickname: &str, email: &str) {
    let response = send_json(
        app,
        "POST",
        "/api/users",
        None,
        Some(register_body(nickname, email, "hunter2pw", "hunter2pw")),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

async fn login(app: &Router, email: &str) -> String {
    let response = send_json(
        app,
        "POST",
        "/api/auth",
        None,
        Some(json!({ "email": email, "password": "hunter2pw" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    body["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn register_succeeds_with_empty_body() {
    let state = test_state().await;
    let app = app(&state);

    let response = send_json(
        &app,
        "POST",
        "/api/users",
        None,
        Some(register_body("alice", "alice@example.com", "pw", "pw")),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await, json!({}));
}

#[tokio::test]
async fn duplicate_email_fails_on_second_attempt() {
    let state = test_state().await;
    let app = app(&state);

    register(&app, "alice", "alice@example.com").await;

    let response = send_json(
        &app,
        "POST",
        "/api/users",
        None,
        Some(register_body(
            "different-nickname",
            "alice@example.com",
            "pw",
            "pw",
        )),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(
        body["errorMessage"],
        "email or nickname is already registered"
    );
}

#[tokio::test]
async fn duplicate_nickname_fails_on_second_attempt() {
    let state = test_state().await;
    let app = app(&state);

    register(&app, "alice", "alice@example.com").await;

    let response = send_json(
        &app,
        "POST",
        "/api/users",
        None,
        Some(register_body("alice", "other@example.com", "pw", "pw")),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn mismatched_confirmation_fails_before_any_write() {
    let state = test_state().await;
    let app = app(&state);

    let response = send_json(
        &app,
        "POST",
        "/api/users",
        None,
        Some(register_body("alice", "alice@example.com", "pw", "other")),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(
        body["errorMessage"],
        "password does not match the confirmation"
    );

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
        .fetch_one(state.pool())
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn login_then_me_roundtrip() {
    let state = test_state().await;
    let app = app(&state);

    register(&app, "alice", "alice@example.com").await;
    let token = login(&app, "alice@example.com").await;

    let response = send_json(&app, "GET", "/api/users/me", Some(&token), None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(
        body,
        json!({ "user": { "email": "alice@example.com", "nickname": "alice" } })
    );
}

#[tokio::test]
async fn login_with_wrong_password_fails() {
    let state = test_state().await;
    let app = app(&state);

    register(&app, "alice", "alice@example.com").await;

    let response = send_json(
        &app,
        "POST",
        "/api/auth",
        None,
        Some(json!({ "email": "alice@example.com", "password": "wrong" })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["errorMessage"], "incorrect email or password");
}

#[tokio::test]
async fn urlencoded_login_is_accepted() {
    let state = test_state().await;
    let app = app(&state);

    register(&app, "alice", "alice@example.com").await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/auth")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from("email=alice%40example.com&password=hunter2pw"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["token"].is_string());
}

#[tokio::test]
async fn guarded_route_rejects_missing_header() {
    let state = test_state().await;
    let app = app(&state);

    let response = send_json(&app, "GET", "/api/users/me", None, None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["errorMessage"], "please log in");
}

#[tokio::test]
async fn guarded_route_rejects_non_bearer_scheme() {
    let state = test_state().await;
    let app = app(&state);

    register(&app, "alice", "alice@example.com").await;
    let token = login(&app, "alice@example.com").await;

    let request = Request::builder()
        .method("GET")
        .uri("/api/users/me")
        .header(header::AUTHORIZATION, format!("Token {token}"))
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn guarded_route_rejects_garbage_token() {
    let state = test_state().await;
    let app = app(&state);

    let response = send_json(&app, "GET", "/api/goods", Some("not-a-token"), None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn token_for_deleted_user_no_longer_authenticates() {
    let state = test_state().await;
    let app = app(&state);

    register(&app, "alice", "alice@example.com").await;
    let token = login(&app, "alice@example.com").await;

    sqlx::query("DELETE FROM users WHERE email = $1")
        .bind("alice@example.com")
        .execute(state.pool())
        .await
        .unwrap();

    let response = send_json(&app, "GET", "/api/users/me", Some(&token), None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn goods_listing_is_ordered_by_descending_id() {
    let state = test_state().await;
    let app = app(&state);

    register(&app, "alice", "alice@example.com").await;
    let token = login(&app, "alice@example.com").await;

    let response = send_json(&app, "GET", "/api/goods", Some(&token), None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let goods = body["goods"].as_array().unwrap();
    assert!(!goods.is_empty());

    let ids: Vec<i64> = goods
        .iter()
        .map(|g| g["goodsId"].as_i64().unwrap())
        .collect();
    let mut sorted = ids.clone();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    assert_eq!(ids, sorted);
}

#[tokio::test]
async fn goods_listing_filters_by_category() {
    let state = test_state().await;
    let app = app(&state);

    register(&app, "alice", "alice@example.com").await;
    let token = login(&app, "alice@example.com").await;

    let response = send_json(&app, "GET", "/api/goods?category=drink", Some(&token), None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let goods = body["goods"].as_array().unwrap();
    assert!(!goods.is_empty());
    assert!(goods.iter().all(|g| g["category"] == "drink"));
}

#[tokio::test]
async fn unknown_goods_id_returns_404_with_empty_body() {
    let state = test_state().await;
    let app = app(&state);

    register(&app, "alice", "alice@example.com").await;
    let token = login(&app, "alice@example.com").await;

    let response = send_json(&app, "GET", "/api/goods/999", Some(&token), None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await, json!({}));
}

#[tokio::test]
async fn cart_upsert_twice_keeps_one_entry_with_latest_quantity() {
    let state = test_state().await;
    let app = app(&state);

    register(&app, "alice", "alice@example.com").await;
    let token = login(&app, "alice@example.com").await;

    for quantity in [3, 7] {
        let response = send_json(
            &app,
            "PUT",
            "/api/goods/5/cart",
            Some(&token),
            Some(json!({ "quantity": quantity })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({}));
    }

    let response = send_json(&app, "GET", "/api/goods/cart", Some(&token), None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let cart = body["cart"].as_array().unwrap();
    assert_eq!(cart.len(), 1);
    assert_eq!(cart[0]["quantity"], 7);
    assert_eq!(cart[0]["goods"]["goodsId"], 5);
}

#[tokio::test]
async fn cart_listing_resolves_goods_fields() {
    let state = test_state().await;
    let app = app(&state);

    register(&app, "alice", "alice@example.com").await;
    let token = login(&app, "alice@example.com").await;

    let response = send_json(
        &app,
        "PUT",
        "/api/goods/2/cart",
        Some(&token),
        Some(json!({ "quantity": 1 })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(send_json(&app, "GET", "/api/goods/cart", Some(&token), None).await).await;
    let goods = &body["cart"][0]["goods"];
    assert_eq!(goods["goodsId"], 2);
    assert!(goods["name"].is_string());
    assert!(goods["category"].is_string());
    assert!(goods["price"].is_i64());
}

#[tokio::test]
async fn deleting_absent_cart_entry_succeeds() {
    let state = test_state().await;
    let app = app(&state);

    register(&app, "alice", "alice@example.com").await;
    let token = login(&app, "alice@example.com").await;

    let response = send_json(&app, "DELETE", "/api/goods/5/cart", Some(&token), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({}));
}

#[tokio::test]
async fn deleting_cart_entry_removes_it() {
    let state = test_state().await;
    let app = app(&state);

    register(&app, "alice", "alice@example.com").await;
    let token = login(&app, "alice@example.com").await;

    let response = send_json(
        &app,
        "PUT",
        "/api/goods/5/cart",
        Some(&token),
        Some(json!({ "quantity": 2 })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send_json(&app, "DELETE", "/api/goods/5/cart", Some(&token), None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(send_json(&app, "GET", "/api/goods/cart", Some(&token), None).await).await;
    assert_eq!(body["cart"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn carts_are_scoped_per_user() {
    let state = test_state().await;
    let app = app(&state);

    register(&app, "alice", "alice@example.com").await;
    register(&app, "bob", "bob@example.com").await;
    let alice = login(&app, "alice@example.com").await;
    let bob = login(&app, "bob@example.com").await;

    let response = send_json(
        &app,
        "PUT",
        "/api/goods/5/cart",
        Some(&alice),
        Some(json!({ "quantity": 4 })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(send_json(&app, "GET", "/api/goods/cart", Some(&bob), None).await).await;
    assert_eq!(body["cart"].as_array().unwrap().len(), 0);
}
