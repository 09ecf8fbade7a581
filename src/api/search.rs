//! Word search handler.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use docusearch_backend::search::SearchProvider;

use super::error_response;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Serialize)]
pub struct DocumentIdsResponse {
    pub ids: Vec<String>,
}

/// GET /search?q=word - ids of documents containing the word.
pub async fn search_word(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> Response {
    let word = query.q.trim();
    if word.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "empty search query").into_response();
    }

    match state.search.search_documents_by_word(word).await {
        Ok(ids) => Json(DocumentIdsResponse { ids }).into_response(),
        Err(err) => {
            tracing::error!(query = word, error = %err, "failed to get search results");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, &err.to_string()).into_response()
        }
    }
}
