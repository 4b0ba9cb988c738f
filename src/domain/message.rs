use chrono::{DateTime, Utc};

use super::{ConversationId, Language, MessageId, MessageRole, Modality};

/// A single exchanged message. Messages are immutable once created; there is
/// no update path anywhere in the system.
///
/// Invariants are enforced by the two constructors: a text message carries
/// `original_text` and never a transcript, an audio message carries a
/// transcript (possibly a fallback placeholder) and never `original_text`.
/// `translated_text` is always populated, either with a genuine translation
/// or with the best available source text when the provider failed.
#[derive(Debug, Clone)]
pub struct Message {
    pub id: MessageId,
    pub conversation_id: ConversationId,
    pub role: MessageRole,
    pub modality: Modality,
    pub original_text: Option<String>,
    pub translated_text: String,
    pub transcript_text: Option<String>,
    pub audio_url: Option<String>,
    pub source_language: Language,
    pub target_language: Language,
    pub created_at: DateTime<Utc>,
}

impl Message {
    pub fn text(
        conversation_id: ConversationId,
        role: MessageRole,
        original_text: String,
        translated_text: String,
        source_language: Language,
        target_language: Language,
    ) -> Self {
        Self {
            id: MessageId::new(),
            conversation_id,
            role,
            modality: Modality::Text,
            original_text: Some(original_text),
            translated_text,
            transcript_text: None,
            audio_url: None,
            source_language,
            target_language,
            created_at: Utc::now(),
        }
    }

    pub fn audio(
        conversation_id: ConversationId,
        role: MessageRole,
        transcript_text: String,
        translated_text: String,
        audio_url: String,
        source_language: Language,
        target_language: Language,
    ) -> Self {
        Self {
            id: MessageId::new(),
            conversation_id,
            role,
            modality: Modality::Audio,
            original_text: None,
            translated_text,
            transcript_text: Some(transcript_text),
            audio_url: Some(audio_url),
            source_language,
            target_language,
            created_at: Utc::now(),
        }
    }

    /// The side the speaker produced: original text for text messages,
    /// transcript for audio messages.
    pub fn source_text(&self) -> &str {
        self.original_text
            .as_deref()
            .or(self.transcript_text.as_deref())
            .unwrap_or("")
    }
}
