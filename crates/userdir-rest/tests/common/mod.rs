//! Shared HTTP test harness: the full router over a private in-memory database.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;
use userdir_config::{DatabaseConfig, ServerConfig};
use userdir_repository::{DatabasePool, DatabasePoolInterface, SqliteUserRepository};
use userdir_rest::{create_router_with_state, AppState};
use userdir_service::{UserService, UserServiceImpl};

/// Builds the application with an empty users table.
pub async fn test_app() -> Router {
    let pool = DatabasePool::connect(&DatabaseConfig::in_memory())
        .await
        .expect("Failed to open in-memory database");
    pool.ensure_schema().await.expect("Failed to create schema");

    let database: Arc<dyn DatabasePoolInterface> = Arc::new(pool);
    let repository = Arc::new(SqliteUserRepository::new(Arc::clone(&database)));
    let user_service: Arc<dyn UserService> = Arc::new(UserServiceImpl::new(repository));

    create_router_with_state(AppState::new(user_service, database), &ServerConfig::default())
}

/// Sends a request and returns the status and the JSON body (`Null` if empty).
pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    send_request(app, request).await
}

/// Sends a raw request.
#[allow(dead_code)]
pub async fn send_request(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, json)
}
