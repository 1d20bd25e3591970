#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header::CONTENT_TYPE, Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use jobq_api::config::ServerConfig;
use jobq_api::router::build_app_router;
use jobq_api::state::AppState;
use jobq_db::{JobStore, MemoryJobStore};
use jobq_worker::{DispatchQueue, JobRegistry};

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["https://console.example.com".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 5,
        db_max_connections: 5,
    }
}

/// Build the full application router over `store`, with a dispatch queue
/// of `queue_capacity`. No workers are started; tests that need processing
/// start a pool on the returned state.
pub fn build_test_app_with(store: Arc<dyn JobStore>, queue_capacity: usize) -> (Router, AppState) {
    build_test_app_with_config(store, queue_capacity, test_config())
}

/// Like [`build_test_app_with`], with an explicit server configuration.
pub fn build_test_app_with_config(
    store: Arc<dyn JobStore>,
    queue_capacity: usize,
    config: ServerConfig,
) -> (Router, AppState) {
    let state = AppState {
        registry: JobRegistry::new(store),
        queue: Arc::new(DispatchQueue::new(queue_capacity)),
        config: Arc::new(config.clone()),
    };
    (build_app_router(state.clone(), &config), state)
}

/// Router over a fresh in-memory store.
pub fn build_test_app() -> (Router, AppState) {
    build_test_app_with(Arc::new(MemoryJobStore::new()), 64)
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: &str) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
