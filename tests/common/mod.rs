#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Body;
use axum::extract::ConnectInfo;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use scholaris::router::init_router;
use scholaris::state::AppState;
use scholaris_config::{CorsConfig, JwtConfig, RateLimitConfig};
use scholaris_core::hash_password;
use scholaris_store::{EntityStore, MemoryStore};

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const AUDITOR_EMAIL: &str = "auditor@example.com";
pub const TEST_PASSWORD: &str = "testpass123";

async fn seed_user(store: &MemoryStore, email: &str, password: &str, role: &str) {
    store
        .create(
            "users",
            json!({
                "first_name": "Test",
                "last_name": "User",
                "email": email,
                "password": hash_password(password).unwrap(),
                "role": role,
            }),
        )
        .await
        .unwrap();
}

/// Builds the full router over a fresh in-memory store seeded with an
/// admin and an auditor account. Clone the router for each request; the
/// store behind it is shared.
pub async fn setup_test_app() -> (axum::Router, Arc<MemoryStore>) {
    dotenvy::dotenv().ok();

    let store = Arc::new(MemoryStore::new());
    seed_user(store.as_ref(), ADMIN_EMAIL, TEST_PASSWORD, "admin").await;
    seed_user(store.as_ref(), AUDITOR_EMAIL, TEST_PASSWORD, "auditor").await;

    let state = AppState {
        store: store.clone(),
        jwt_config: JwtConfig::from_env(),
        cors_config: CorsConfig::from_env(),
        rate_limit_config: RateLimitConfig::default(),
    };
    (init_router(state), store)
}

/// Builds a request carrying the peer address the rate limiter keys on.
pub fn build_request(
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .extension(ConnectInfo(SocketAddr::from(([127, 0, 0, 1], 8080))));

    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }

    let body = match body {
        Some(value) => {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_string(&value).unwrap())
        }
        None => Body::empty(),
    };

    builder.body(body).unwrap()
}

pub async fn send(app: axum::Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

pub async fn get_auth_token(app: axum::Router, email: &str, password: &str) -> String {
    let request = build_request(
        "POST",
        "/api/auth/login",
        None,
        Some(json!({
            "email": email,
            "password": password
        })),
    );

    let (status, body) = send(app, request).await;
    assert_eq!(status, StatusCode::OK, "login failed: {}", body);
    body["access_token"].as_str().unwrap().to_string()
}

pub async fn create_record(
    app: axum::Router,
    token: &str,
    entity: &str,
    body: Value,
) -> (StatusCode, Value) {
    let request = build_request(
        "POST",
        &format!("/api/{}", entity),
        Some(token),
        Some(body),
    );
    send(app, request).await
}

pub async fn list_records(
    app: axum::Router,
    token: &str,
    entity: &str,
    query: &str,
) -> (StatusCode, Value) {
    let uri = if query.is_empty() {
        format!("/api/{}", entity)
    } else {
        format!("/api/{}?{}", entity, query)
    };
    let request = build_request("GET", &uri, Some(token), None);
    send(app, request).await
}

pub async fn get_record(
    app: axum::Router,
    token: &str,
    entity: &str,
    id: &str,
) -> (StatusCode, Value) {
    let request = build_request("GET", &format!("/api/{}/{}", entity, id), Some(token), None);
    send(app, request).await
}

pub async fn replace_record(
    app: axum::Router,
    token: &str,
    entity: &str,
    id: &str,
    body: Value,
) -> (StatusCode, Value) {
    let request = build_request(
        "PUT",
        &format!("/api/{}/{}", entity, id),
        Some(token),
        Some(body),
    );
    send(app, request).await
}

pub async fn patch_record(
    app: axum::Router,
    token: &str,
    entity: &str,
    id: &str,
    body: Value,
) -> (StatusCode, Value) {
    let request = build_request(
        "PATCH",
        &format!("/api/{}/{}", entity, id),
        Some(token),
        Some(body),
    );
    send(app, request).await
}

pub async fn delete_record(
    app: axum::Router,
    token: &str,
    entity: &str,
    id: &str,
) -> (StatusCode, Value) {
    let request = build_request(
        "DELETE",
        &format!("/api/{}/{}", entity, id),
        Some(token),
        None,
    );
    send(app, request).await
}

/// Percent-encodes a query parameter value. Keeps the RFC 3986
/// unreserved set as-is.
pub fn encode_query_value(raw: &str) -> String {
    let mut encoded = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                encoded.push(byte as char)
            }
            _ => encoded.push_str(&format!("%{:02X}", byte)),
        }
    }
    encoded
}
