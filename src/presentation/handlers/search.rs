use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::ConversationId;
use crate::infrastructure::observability::sanitize_text;
use crate::presentation::state::AppState;

use super::conversations::{conversation_error_response, resolve_limit};
use super::responses::{SearchHitResponse, error_response};

const DEFAULT_SEARCH_LIMIT: usize = 20;
const MAX_SEARCH_LIMIT: usize = 100;

#[derive(Deserialize)]
pub struct SearchQuery {
    pub q: String,
    pub conversation_id: Option<Uuid>,
    pub limit: Option<i64>,
}

#[derive(Serialize)]
pub struct SearchResponse {
    pub results: Vec<SearchHitResponse>,
}

#[tracing::instrument(skip(state, query))]
pub async fn search_handler(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> impl IntoResponse {
    let limit = match resolve_limit(query.limit, DEFAULT_SEARCH_LIMIT, MAX_SEARCH_LIMIT) {
        Ok(limit) => limit,
        Err(response) => return response,
    };

    if query.q.trim().is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "empty_query");
    }

    tracing::debug!(query = %sanitize_text(&query.q), "Searching messages");

    let conversation_id = query.conversation_id.map(ConversationId::from_uuid);

    match state
        .conversation_service
        .search(&query.q, conversation_id, limit)
        .await
    {
        Ok(hits) => (
            StatusCode::OK,
            Json(SearchResponse {
                results: hits.iter().map(SearchHitResponse::from).collect(),
            }),
        )
            .into_response(),
        Err(e) => conversation_error_response(e),
    }
}
