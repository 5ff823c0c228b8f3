/// Common test utilities for integration tests
///
/// This module provides shared infrastructure for integration tests:
/// - Router over an in-memory store (no network, no files)
/// - Request builders and response decoding
/// - Registration/login helpers that return session tokens

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;
use taskdeck_api::app::{build_router, AppState};
use taskdeck_api::config::{ApiConfig, Config, JwtConfig, StorageConfig};
use taskdeck_shared::store::{MemoryBackend, Store};
use tower::ServiceExt;

/// Secret used by every test token
pub const TEST_SECRET: &str = "integration-test-secret-0123456789abcdef";

/// Test context containing the app and a handle on its store
pub struct TestContext {
    pub app: Router,
    pub store: Arc<Store>,
}

impl TestContext {
    /// Creates a fresh context over an empty in-memory store
    pub fn new() -> Self {
        let config = Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                cors_origins: vec!["*".to_string()],
            },
            storage: StorageConfig {
                data_dir: PathBuf::from("unused-in-tests"),
            },
            jwt: JwtConfig {
                secret: TEST_SECRET.to_string(),
            },
        };

        let state = AppState::new(Store::new(MemoryBackend::new()), config);
        let store = state.store.clone();
        let app = build_router(state);

        TestContext { app, store }
    }

    /// Sends a request and returns the response
    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.app.clone().oneshot(request).await.unwrap()
    }

    /// Registers a user and returns their session token
    pub async fn register(&self, username: &str, email: &str, password: &str) -> String {
        let response = self
            .send(post_json(
                "/api/register",
                serde_json::json!({
                    "username": username,
                    "email": email,
                    "password": password,
                }),
                None,
            ))
            .await;

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = body_json(response).await;
        body["token"].as_str().unwrap().to_string()
    }

    /// Creates a task and returns the response body
    pub async fn create_task(&self, token: &str, body: Value) -> Value {
        let response = self.send(post_json("/api/tasks", body, Some(token))).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        body_json(response).await
    }

    /// Lists the caller's tasks
    pub async fn list_tasks(&self, token: &str) -> Vec<Value> {
        let response = self.send(get("/api/tasks", Some(token))).await;
        assert_eq!(response.status(), StatusCode::OK);
        body_json(response).await.as_array().unwrap().clone()
    }
}

/// Builds a GET request, optionally authenticated
pub fn get(path: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(path);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

/// Builds a JSON POST request, optionally authenticated
pub fn post_json(path: &str, body: Value, token: Option<&str>) -> Request<Body> {
    json_request("POST", path, body, token)
}

/// Builds a JSON PUT request
pub fn put_json(path: &str, body: Value, token: Option<&str>) -> Request<Body> {
    json_request("PUT", path, body, token)
}

/// Builds a DELETE request, optionally authenticated
pub fn delete(path: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("DELETE").uri(path);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

fn json_request(method: &str, path: &str, body: Value, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(path)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

/// Decodes a response body as JSON
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
