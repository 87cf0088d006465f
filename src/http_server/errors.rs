//! # HTTP API Errors
//!
//! Every non-2xx response carries `{"message": "..."}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error};

use crate::storage::StorageError;

/// Result type for route handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Well-formed id with no matching record
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Body missing, not JSON, or of the wrong shape
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// Path id cannot be parsed for this collection
    #[error("Invalid {entity} id: {raw}")]
    InvalidId { entity: &'static str, raw: String },

    // ==================
    // Store Errors (400 or 500)
    // ==================
    #[error(transparent)]
    Storage(#[from] StorageError),

    // ==================
    // Server Errors (5xx)
    // ==================
    /// Stored data cannot be turned into a response
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidBody(_) | ApiError::InvalidId { .. } => StatusCode::BAD_REQUEST,
            ApiError::Storage(e) if e.is_client_error() => StatusCode::BAD_REQUEST,
            ApiError::Storage(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(status = status.as_u16(), error = %self, "request failed");
        } else {
            debug!(status = status.as_u16(), error = %self, "request rejected");
        }

        let body = Json(ErrorResponse {
            message: self.to_string(),
        });
        (status, body).into_response()
    }
}
