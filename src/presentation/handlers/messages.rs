use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use uuid::Uuid;

use crate::application::services::IngestionError;
use crate::domain::ConversationId;
use crate::infrastructure::observability::sanitize_text;
use crate::presentation::state::AppState;

use super::responses::{IngestedMessageResponse, error_response};

#[derive(Deserialize)]
pub struct IngestTextRequest {
    pub conversation_id: Uuid,
    pub role: String,
    pub text: String,
    pub source_language: String,
    pub target_language: String,
}

#[tracing::instrument(skip(state, request))]
pub async fn ingest_text_handler(
    State(state): State<AppState>,
    Json(request): Json<IngestTextRequest>,
) -> impl IntoResponse {
    tracing::debug!(text = %sanitize_text(&request.text), "Ingesting text message");

    match state
        .ingestion_service
        .ingest_text(
            ConversationId::from_uuid(request.conversation_id),
            &request.role,
            &request.text,
            &request.source_language,
            &request.target_language,
        )
        .await
    {
        Ok(ingested) => (
            StatusCode::CREATED,
            Json(IngestedMessageResponse::from(&ingested)),
        )
            .into_response(),
        Err(e) => ingestion_error_response(e),
    }
}

#[derive(Deserialize)]
pub struct FinalizeAudioRequest {
    pub conversation_id: Uuid,
    pub role: String,
    pub audio_url: String,
    pub mime_type: Option<String>,
    pub source_language: String,
    pub target_language: String,
}

#[tracing::instrument(skip(state, request))]
pub async fn finalize_audio_handler(
    State(state): State<AppState>,
    Json(request): Json<FinalizeAudioRequest>,
) -> impl IntoResponse {
    let allowed = &state.settings.audio.allowed_mime_types;
    let mime_type = match request.mime_type {
        Some(mime) if allowed.contains(&mime) => mime,
        Some(_) => return error_response(StatusCode::BAD_REQUEST, "unsupported_media_type"),
        None => match allowed.first() {
            Some(mime) => mime.clone(),
            None => return error_response(StatusCode::BAD_REQUEST, "unsupported_media_type"),
        },
    };

    match state
        .ingestion_service
        .ingest_audio(
            ConversationId::from_uuid(request.conversation_id),
            &request.role,
            &request.audio_url,
            &mime_type,
            &request.source_language,
            &request.target_language,
        )
        .await
    {
        Ok(ingested) => (
            StatusCode::CREATED,
            Json(IngestedMessageResponse::from(&ingested)),
        )
            .into_response(),
        Err(e) => ingestion_error_response(e),
    }
}

fn ingestion_error_response(error: IngestionError) -> Response {
    match error {
        IngestionError::InvalidRole(_) => error_response(StatusCode::BAD_REQUEST, "invalid_role"),
        IngestionError::UnsupportedLanguage(_) => {
            error_response(StatusCode::BAD_REQUEST, "unsupported_language")
        }
        IngestionError::EmptyText => error_response(StatusCode::BAD_REQUEST, "empty_text"),
        IngestionError::ConversationNotFound => {
            error_response(StatusCode::NOT_FOUND, "conversation_not_found")
        }
        IngestionError::PayloadTooLarge { size, max } => {
            tracing::warn!(size, max, "Rejected oversized audio payload");
            error_response(StatusCode::BAD_REQUEST, "audio_too_large")
        }
        IngestionError::AudioFetch(e) => {
            tracing::error!(error = %e, "Audio fetch failed");
            error_response(StatusCode::BAD_GATEWAY, "audio_fetch_failed")
        }
        IngestionError::Repository(e) => {
            tracing::error!(error = %e, "Repository failure");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
        }
    }
}
