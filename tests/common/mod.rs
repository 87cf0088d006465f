//! Shared helpers for driving the router in-process.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use film_catalog::http_server::{build_router, ErrorResponse, ServerConfig};
use film_catalog::models::catalog_schemas;
use film_catalog::storage::MemoryStore;
use serde_json::Value;
use tower::ServiceExt;

/// Router over a fresh memory-only store
pub fn test_app() -> Router {
    app_with_store(Arc::new(MemoryStore::new(catalog_schemas())))
}

pub fn app_with_store(store: Arc<MemoryStore>) -> Router {
    build_router(&ServerConfig::default(), store)
}

/// Status and raw body of one request
pub async fn send_raw(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<&str>,
) -> (StatusCode, Vec<u8>) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, bytes.to_vec())
}

/// Status and JSON body of one request; `Value::Null` for an empty body
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let body = body.map(|b| b.to_string());
    let (status, bytes) = send_raw(app, method, uri, body.as_deref()).await;
    if bytes.is_empty() {
        return (status, Value::Null);
    }
    (status, serde_json::from_slice(&bytes).unwrap())
}

/// `message` of an error body; panics if the body is not an error body
pub fn message(body: &Value) -> String {
    let error: ErrorResponse = serde_json::from_value(body.clone()).unwrap();
    error.message
}
