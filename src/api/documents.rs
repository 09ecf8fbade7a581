//! Document upload, download and delete handlers.

use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use futures::TryStreamExt;
use tokio_util::io::{ReaderStream, StreamReader};

use docusearch_backend::storage::DocumentStore;

use super::{error_response, store_error_response};
use crate::state::AppState;

/// POST /document/:id - store a new document from the raw request body.
pub async fn upload_document(
    State(state): State<Arc<AppState>>,
    Path(doc_id): Path<String>,
    body: Body,
) -> Response {
    let doc_id = doc_id.trim().to_string();
    if doc_id.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "empty document id").into_response();
    }

    let stream = body
        .into_data_stream()
        .map_err(|err| std::io::Error::new(std::io::ErrorKind::Other, err));
    let reader = StreamReader::new(stream);

    match state.store.add_document(&doc_id, Box::new(reader)).await {
        Ok(()) => StatusCode::OK.into_response(),
        Err(err) => store_error_response(&doc_id, err).into_response(),
    }
}

/// GET /document/:id - stream the document bytes back.
pub async fn get_document(
    State(state): State<Arc<AppState>>,
    Path(doc_id): Path<String>,
) -> Response {
    match state.store.get_document(&doc_id).await {
        Ok(reader) => Body::from_stream(ReaderStream::new(reader)).into_response(),
        Err(err) => store_error_response(&doc_id, err).into_response(),
    }
}

/// DELETE /document/:id
pub async fn delete_document(
    State(state): State<Arc<AppState>>,
    Path(doc_id): Path<String>,
) -> Response {
    match state.store.remove_document(&doc_id).await {
        Ok(()) => StatusCode::OK.into_response(),
        Err(err) => store_error_response(&doc_id, err).into_response(),
    }
}
