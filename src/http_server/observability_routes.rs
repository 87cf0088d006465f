//! Observability HTTP Routes
//!
//! Liveness endpoints: a plain-text banner at `/` and a JSON health check.

use axum::{http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde::{Deserialize, Serialize};

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Create health routes
pub fn health_routes() -> Router {
    Router::new()
        .route("/", get(banner_handler))
        .route("/health", get(health_handler))
}

async fn banner_handler() -> &'static str {
    "Film catalog backend running"
}

/// Health check handler
async fn health_handler() -> impl IntoResponse {
    let response = HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    (StatusCode::OK, Json(response))
}
