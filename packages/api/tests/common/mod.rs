#![allow(dead_code)]

use api::build_app;
use api::config::Config;
use api::state::AppState;
use axum::body::Body;
use axum::http::{header::CONTENT_TYPE, Method, Request, StatusCode};
use axum::Router;
use games::catalog::GameCatalog;
use serde_json::{json, Value};
use tower::ServiceExt;

pub const TEST_PASSWORD: &str = "carved-in-stone";

/// A fresh app over in-memory storage.
pub fn test_app() -> Router {
    let mut config = Config::in_memory("test-secret-key-for-jwt-tokens-in-testing");
    // bcrypt's minimum cost keeps the suite fast
    config.bcrypt_cost = 4;
    let catalog = GameCatalog::builtin().expect("bundled catalog should load");
    build_app(AppState::in_memory(&config, catalog))
}

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("x-auth-token", token);
    }
    let request = match body {
        Some(body) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request should build");

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("router should respond");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

/// Registers a user and returns their token.
pub async fn register(app: &Router, username: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/auth/register",
        None,
        Some(json!({
            "username": username,
            "email": format!("{}@example.com", username),
            "password": TEST_PASSWORD,
        })),
    )
    .await;
    assert_eq!(
        status,
        StatusCode::CREATED,
        "Expected 201 Created when registering {}, got {} {}",
        username,
        status,
        body
    );
    body["token"]
        .as_str()
        .expect("register response should carry a token")
        .to_string()
}

pub async fn user_id(app: &Router, token: &str) -> String {
    let (status, body) = send(app, Method::GET, "/api/auth/user", Some(token), None).await;
    assert_eq!(status, StatusCode::OK, "GET /api/auth/user failed: {}", body);
    body["id"].as_str().expect("user id").to_string()
}
