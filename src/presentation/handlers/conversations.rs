use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use uuid::Uuid;

use crate::application::services::ConversationError;
use crate::domain::{ConversationId, MessageId};
use crate::presentation::state::AppState;

use super::responses::{ConversationResponse, MessagePageResponse, error_response};

const DEFAULT_PAGE_SIZE: usize = 50;
const MAX_PAGE_SIZE: usize = 200;

#[derive(Deserialize)]
pub struct CreateConversationRequest {
    pub title: Option<String>,
    pub doctor_language: String,
    pub patient_language: String,
}

#[tracing::instrument(skip(state, request))]
pub async fn create_conversation_handler(
    State(state): State<AppState>,
    Json(request): Json<CreateConversationRequest>,
) -> impl IntoResponse {
    match state
        .conversation_service
        .create(
            request.title,
            &request.doctor_language,
            &request.patient_language,
        )
        .await
    {
        Ok(conversation) => (
            StatusCode::CREATED,
            Json(ConversationResponse::from(&conversation)),
        )
            .into_response(),
        Err(e) => conversation_error_response(e),
    }
}

#[tracing::instrument(skip(state))]
pub async fn get_conversation_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    match state
        .conversation_service
        .get(ConversationId::from_uuid(id))
        .await
    {
        Ok(conversation) => {
            (StatusCode::OK, Json(ConversationResponse::from(&conversation))).into_response()
        }
        Err(e) => conversation_error_response(e),
    }
}

#[derive(Deserialize)]
pub struct ListMessagesQuery {
    pub after_id: Option<String>,
    pub limit: Option<i64>,
}

#[tracing::instrument(skip(state, query))]
pub async fn list_messages_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<ListMessagesQuery>,
) -> impl IntoResponse {
    let limit = match resolve_limit(query.limit, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE) {
        Ok(limit) => limit,
        Err(response) => return response,
    };

    let after_id = match query.after_id.as_deref() {
        None => None,
        Some(raw) => match Uuid::parse_str(raw) {
            Ok(uuid) => Some(MessageId::from_uuid(uuid)),
            Err(_) => return error_response(StatusCode::BAD_REQUEST, "invalid_cursor"),
        },
    };

    match state
        .conversation_service
        .list_messages(ConversationId::from_uuid(id), after_id, limit)
        .await
    {
        Ok(messages) => (
            StatusCode::OK,
            Json(MessagePageResponse::from_messages(&messages)),
        )
            .into_response(),
        Err(e) => conversation_error_response(e),
    }
}

pub fn resolve_limit(
    requested: Option<i64>,
    default: usize,
    max: usize,
) -> Result<usize, Response> {
    match requested {
        None => Ok(default),
        Some(limit) if limit >= 1 && limit <= max as i64 => Ok(limit as usize),
        Some(_) => Err(error_response(StatusCode::BAD_REQUEST, "invalid_limit")),
    }
}

pub fn conversation_error_response(error: ConversationError) -> Response {
    match error {
        ConversationError::UnsupportedLanguage(_) => {
            error_response(StatusCode::BAD_REQUEST, "unsupported_language")
        }
        ConversationError::NotFound => {
            error_response(StatusCode::NOT_FOUND, "conversation_not_found")
        }
        ConversationError::InvalidCursor => {
            error_response(StatusCode::BAD_REQUEST, "invalid_cursor")
        }
        ConversationError::Repository(e) => {
            tracing::error!(error = %e, "Repository failure");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
        }
    }
}
