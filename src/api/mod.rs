//! HTTP handlers. Thin wrappers that translate between the wire and the
//! document/search services.

pub mod documents;
pub mod search;

use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use docusearch_backend::storage::StoreError;

#[derive(Serialize)]
pub struct ErrorResponse {
    pub message: String,
}

/// Builds a JSON error response body.
pub fn error_response(status: StatusCode, message: &str) -> (StatusCode, Json<ErrorResponse>) {
    (status, Json(ErrorResponse { message: message.to_string() }))
}

/// Maps a store error to an HTTP response, logging everything that is not a
/// plain client error.
pub fn store_error_response(
    doc_id: &str,
    err: StoreError,
) -> (StatusCode, Json<ErrorResponse>) {
    match err {
        StoreError::AlreadyExists => error_response(StatusCode::BAD_REQUEST, "item already exists"),
        StoreError::NotFound => error_response(StatusCode::NOT_FOUND, "document not found"),
        err => {
            tracing::error!(doc_id, error = %err, "document operation failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, &err.to_string())
        }
    }
}

/// GET /api/health
pub async fn health_check() -> &'static str {
    "ok"
}
