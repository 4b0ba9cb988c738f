use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Deserialize;
use uuid::Uuid;

use crate::application::ports::AiProviderError;
use crate::application::services::SummaryError;
use crate::domain::{ConversationId, SummaryStyle};
use crate::presentation::state::AppState;

use super::responses::{SummaryResponse, error_response};

#[derive(Deserialize, Default)]
pub struct SummarizeRequest {
    pub style: Option<String>,
}

#[tracing::instrument(skip(state, request))]
pub async fn summarize_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    request: Option<Json<SummarizeRequest>>,
) -> impl IntoResponse {
    let request = request.map(|Json(r)| r).unwrap_or_default();

    let style = match request.style.as_deref() {
        None => SummaryStyle::default(),
        Some(raw) => match raw.parse::<SummaryStyle>() {
            Ok(style) => style,
            Err(_) => return error_response(StatusCode::BAD_REQUEST, "invalid_style"),
        },
    };

    match state
        .summary_service
        .summarize(ConversationId::from_uuid(id), style)
        .await
    {
        Ok(summary) => {
            (StatusCode::CREATED, Json(SummaryResponse::from(&summary))).into_response()
        }
        Err(SummaryError::ConversationNotFound) => {
            error_response(StatusCode::NOT_FOUND, "conversation_not_found")
        }
        Err(SummaryError::Provider(AiProviderError::RateLimited)) => error_response(
            StatusCode::TOO_MANY_REQUESTS,
            format!("{}_rate_limited", state.settings.ai.provider),
        ),
        Err(SummaryError::Provider(AiProviderError::ParseFailed)) => {
            error_response(StatusCode::BAD_GATEWAY, "summary_parse_failed")
        }
        Err(SummaryError::Provider(e)) => {
            tracing::error!(error = %e, "Summarization provider failure");
            error_response(StatusCode::BAD_GATEWAY, "ai_provider_error")
        }
        Err(SummaryError::Repository(e)) => {
            tracing::error!(error = %e, "Repository failure");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
        }
    }
}
