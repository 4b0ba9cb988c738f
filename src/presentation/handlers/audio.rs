use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::ConversationId;
use crate::presentation::state::AppState;

use super::conversations::conversation_error_response;
use super::responses::error_response;

#[derive(Deserialize)]
pub struct PresignRequest {
    pub conversation_id: Uuid,
    pub mime_type: Option<String>,
}

#[derive(Serialize)]
pub struct PresignResponse {
    pub upload_url: String,
    pub file_url: String,
    pub object_key: String,
    pub expires_in_seconds: u64,
}

/// Authorizes a direct browser upload. The server never proxies audio bytes
/// on the way in; the client PUTs straight to object storage and then calls
/// the finalize endpoint with the resulting file URL.
#[tracing::instrument(skip(state, request))]
pub async fn presign_audio_handler(
    State(state): State<AppState>,
    Json(request): Json<PresignRequest>,
) -> impl IntoResponse {
    let conversation_id = ConversationId::from_uuid(request.conversation_id);

    if let Err(e) = state.conversation_service.get(conversation_id).await {
        return conversation_error_response(e);
    }

    let allowed = &state.settings.audio.allowed_mime_types;
    let mime_type = match request.mime_type {
        Some(mime) if allowed.contains(&mime) => mime,
        Some(_) => return error_response(StatusCode::BAD_REQUEST, "unsupported_media_type"),
        None => match allowed.first() {
            Some(mime) => mime.clone(),
            None => return error_response(StatusCode::BAD_REQUEST, "unsupported_media_type"),
        },
    };

    let storage = match &state.audio_storage {
        Some(storage) => storage,
        None => {
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "storage_not_configured");
        }
    };

    match storage.presign_upload(conversation_id, &mime_type).await {
        Ok(presigned) => (
            StatusCode::OK,
            Json(PresignResponse {
                upload_url: presigned.upload_url,
                file_url: presigned.file_url,
                object_key: presigned.object_key,
                expires_in_seconds: state.settings.storage.presign_expiry_seconds,
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Presign failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "presign_failed")
        }
    }
}
