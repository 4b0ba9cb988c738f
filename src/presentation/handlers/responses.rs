use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::application::ports::SearchHit;
use crate::application::services::IngestedMessage;
use crate::domain::{Conversation, Message, Summary};

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// The uniform error envelope: a machine-readable code under a single key.
pub fn error_response(status: StatusCode, code: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse { error: code.into() }),
    )
        .into_response()
}

#[derive(Serialize)]
pub struct ConversationResponse {
    pub id: Uuid,
    pub title: Option<String>,
    pub doctor_language: String,
    pub patient_language: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Conversation> for ConversationResponse {
    fn from(conversation: &Conversation) -> Self {
        Self {
            id: conversation.id.as_uuid(),
            title: conversation.title.clone(),
            doctor_language: conversation.doctor_language.as_str().to_string(),
            patient_language: conversation.patient_language.as_str().to_string(),
            created_at: conversation.created_at,
        }
    }
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub id: Uuid,
    pub conversation_id: Uuid,
    pub role: String,
    pub modality: String,
    pub original_text: Option<String>,
    pub translated_text: String,
    pub transcript_text: Option<String>,
    pub audio_url: Option<String>,
    pub source_language: String,
    pub target_language: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Message> for MessageResponse {
    fn from(message: &Message) -> Self {
        Self {
            id: message.id.as_uuid(),
            conversation_id: message.conversation_id.as_uuid(),
            role: message.role.as_str().to_string(),
            modality: message.modality.as_str().to_string(),
            original_text: message.original_text.clone(),
            translated_text: message.translated_text.clone(),
            transcript_text: message.transcript_text.clone(),
            audio_url: message.audio_url.clone(),
            source_language: message.source_language.as_str().to_string(),
            target_language: message.target_language.as_str().to_string(),
            created_at: message.created_at,
        }
    }
}

#[derive(Serialize)]
pub struct IngestedMessageResponse {
    #[serde(flatten)]
    pub message: MessageResponse,
    pub used_fallback: bool,
}

impl From<&IngestedMessage> for IngestedMessageResponse {
    fn from(ingested: &IngestedMessage) -> Self {
        Self {
            message: MessageResponse::from(&ingested.message),
            used_fallback: ingested.used_fallback,
        }
    }
}

#[derive(Serialize)]
pub struct MessagePageResponse {
    pub messages: Vec<MessageResponse>,
    pub next_after_id: Option<Uuid>,
}

impl MessagePageResponse {
    pub fn from_messages(messages: &[Message]) -> Self {
        Self {
            next_after_id: messages.last().map(|m| m.id.as_uuid()),
            messages: messages.iter().map(MessageResponse::from).collect(),
        }
    }
}

#[derive(Serialize)]
pub struct SearchHitResponse {
    pub message_id: Uuid,
    pub conversation_id: Uuid,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub snippet: String,
}

impl From<&SearchHit> for SearchHitResponse {
    fn from(hit: &SearchHit) -> Self {
        Self {
            message_id: hit.message_id.as_uuid(),
            conversation_id: hit.conversation_id.as_uuid(),
            role: hit.role.as_str().to_string(),
            created_at: hit.created_at,
            snippet: hit.snippet.clone(),
        }
    }
}

#[derive(Serialize)]
pub struct SummaryResponse {
    pub id: Uuid,
    pub conversation_id: Uuid,
    pub summary_text: String,
    pub symptoms: Vec<String>,
    pub diagnoses: Vec<String>,
    pub medications: Vec<String>,
    pub follow_up: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&Summary> for SummaryResponse {
    fn from(summary: &Summary) -> Self {
        Self {
            id: summary.id.as_uuid(),
            conversation_id: summary.conversation_id.as_uuid(),
            summary_text: summary.summary_text.clone(),
            symptoms: summary.symptoms.clone(),
            diagnoses: summary.diagnoses.clone(),
            medications: summary.medications.clone(),
            follow_up: summary.follow_up.clone(),
            created_at: summary.created_at,
        }
    }
}
