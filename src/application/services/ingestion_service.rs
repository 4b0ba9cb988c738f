use std::sync::Arc;

use crate::application::ports::{
    AiProvider, AudioFetchError, AudioFetcher, ConversationRepository, RepositoryError,
};
use crate::domain::{ConversationId, Language, Message, MessageRole};

/// Placeholder stored for both transcript and translation when either AI call
/// fails during audio ingestion. Both fields are replaced together so a
/// transcript is never presented without its translation or vice versa.
pub const TRANSCRIPTION_FALLBACK: &str = "[Transcription unavailable]";

/// Result of an ingestion: the persisted message plus an explicit marker for
/// whether the fail-open fallback replaced the provider output.
#[derive(Debug, Clone)]
pub struct IngestedMessage {
    pub message: Message,
    pub used_fallback: bool,
}

/// Validates incoming messages, runs them through the AI provider and
/// persists the result.
///
/// Provider failures on the translate/transcribe path are fail-open: the
/// message is persisted with the best available source text so the
/// conversational thread is never blocked by AI unavailability. Persisted
/// messages are never retried or re-processed.
pub struct IngestionService {
    repository: Arc<dyn ConversationRepository>,
    provider: Arc<dyn AiProvider>,
    audio_fetcher: Arc<dyn AudioFetcher>,
    max_audio_bytes: u64,
}

impl IngestionService {
    pub fn new(
        repository: Arc<dyn ConversationRepository>,
        provider: Arc<dyn AiProvider>,
        audio_fetcher: Arc<dyn AudioFetcher>,
        max_audio_bytes: u64,
    ) -> Self {
        Self {
            repository,
            provider,
            audio_fetcher,
            max_audio_bytes,
        }
    }

    #[tracing::instrument(skip(self, text), fields(conversation_id = %conversation_id.as_uuid()))]
    pub async fn ingest_text(
        &self,
        conversation_id: ConversationId,
        role: &str,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<IngestedMessage, IngestionError> {
        let (role, source, target) = self.validate(role, source_language, target_language)?;

        if text.trim().is_empty() {
            return Err(IngestionError::EmptyText);
        }

        self.ensure_conversation(conversation_id).await?;

        let (translated, used_fallback) = match self.provider.translate(text, source, target).await
        {
            Ok(translated) => (translated, false),
            Err(e) => {
                tracing::warn!(error = %e, "Translation failed, storing original text");
                (text.to_string(), true)
            }
        };

        let message = Message::text(
            conversation_id,
            role,
            text.to_string(),
            translated,
            source,
            target,
        );
        self.repository.append_message(&message).await?;

        tracing::info!(
            message_id = %message.id.as_uuid(),
            used_fallback,
            "Text message ingested"
        );

        Ok(IngestedMessage {
            message,
            used_fallback,
        })
    }

    #[tracing::instrument(skip(self), fields(conversation_id = %conversation_id.as_uuid()))]
    pub async fn ingest_audio(
        &self,
        conversation_id: ConversationId,
        role: &str,
        audio_url: &str,
        mime_type: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<IngestedMessage, IngestionError> {
        let (role, source, target) = self.validate(role, source_language, target_language)?;

        self.ensure_conversation(conversation_id).await?;

        let audio = self.audio_fetcher.fetch(audio_url).await?;

        // Hard validation, not fail-open: oversized payloads are rejected
        // before any provider call is attempted.
        let size = audio.len() as u64;
        if size > self.max_audio_bytes {
            return Err(IngestionError::PayloadTooLarge {
                size,
                max: self.max_audio_bytes,
            });
        }

        let transcribed = match self.provider.transcribe_audio(&audio, mime_type, source).await {
            Ok(transcript) => match self.provider.translate(&transcript, source, target).await {
                Ok(translated) => Some((transcript, translated)),
                Err(e) => {
                    tracing::warn!(error = %e, "Audio translation failed");
                    None
                }
            },
            Err(e) => {
                tracing::warn!(error = %e, "Audio transcription failed");
                None
            }
        };

        let used_fallback = transcribed.is_none();
        let (transcript, translated) = transcribed.unwrap_or_else(|| {
            (
                TRANSCRIPTION_FALLBACK.to_string(),
                TRANSCRIPTION_FALLBACK.to_string(),
            )
        });

        let message = Message::audio(
            conversation_id,
            role,
            transcript,
            translated,
            audio_url.to_string(),
            source,
            target,
        );
        self.repository.append_message(&message).await?;

        tracing::info!(
            message_id = %message.id.as_uuid(),
            audio_bytes = size,
            used_fallback,
            "Audio message ingested"
        );

        Ok(IngestedMessage {
            message,
            used_fallback,
        })
    }

    fn validate(
        &self,
        role: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<(MessageRole, Language, Language), IngestionError> {
        let role: MessageRole = role
            .parse()
            .map_err(|_| IngestionError::InvalidRole(role.to_string()))?;
        let source: Language = source_language
            .parse()
            .map_err(|_| IngestionError::UnsupportedLanguage(source_language.to_string()))?;
        let target: Language = target_language
            .parse()
            .map_err(|_| IngestionError::UnsupportedLanguage(target_language.to_string()))?;
        Ok((role, source, target))
    }

    async fn ensure_conversation(
        &self,
        conversation_id: ConversationId,
    ) -> Result<(), IngestionError> {
        self.repository
            .get_conversation(conversation_id)
            .await?
            .map(|_| ())
            .ok_or(IngestionError::ConversationNotFound)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum IngestionError {
    #[error("invalid role: {0}")]
    InvalidRole(String),
    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),
    #[error("text must not be empty")]
    EmptyText,
    #[error("conversation not found")]
    ConversationNotFound,
    #[error("audio payload too large: {size} bytes (max {max})")]
    PayloadTooLarge { size: u64, max: u64 },
    #[error("audio fetch: {0}")]
    AudioFetch(#[from] AudioFetchError),
    #[error("repository: {0}")]
    Repository(#[from] RepositoryError),
}
