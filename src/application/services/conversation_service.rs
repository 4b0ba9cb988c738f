use std::sync::Arc;

use crate::application::ports::{ConversationRepository, RepositoryError, SearchHit};
use crate::domain::{Conversation, ConversationId, Language, Message, MessageId};

/// Conversation lifecycle, cursor-based message listing and search.
pub struct ConversationService {
    repository: Arc<dyn ConversationRepository>,
}

impl ConversationService {
    pub fn new(repository: Arc<dyn ConversationRepository>) -> Self {
        Self { repository }
    }

    #[tracing::instrument(skip(self, title))]
    pub async fn create(
        &self,
        title: Option<String>,
        doctor_language: &str,
        patient_language: &str,
    ) -> Result<Conversation, ConversationError> {
        let doctor_language: Language = doctor_language
            .parse()
            .map_err(|_| ConversationError::UnsupportedLanguage(doctor_language.to_string()))?;
        let patient_language: Language = patient_language
            .parse()
            .map_err(|_| ConversationError::UnsupportedLanguage(patient_language.to_string()))?;

        let conversation = Conversation::new(title, doctor_language, patient_language);
        self.repository.create_conversation(&conversation).await?;

        tracing::info!(conversation_id = %conversation.id.as_uuid(), "Conversation created");
        Ok(conversation)
    }

    pub async fn get(&self, id: ConversationId) -> Result<Conversation, ConversationError> {
        self.repository
            .get_conversation(id)
            .await?
            .ok_or(ConversationError::NotFound)
    }

    /// One page of messages in canonical (created_at ASC, id ASC) order.
    ///
    /// With a cursor, returns up to `limit` messages strictly after it; a
    /// cursor that does not resolve to a message of this conversation is
    /// rejected as `InvalidCursor`, never answered with an empty page.
    /// Without a cursor, returns the latest `limit` messages, still in
    /// ascending order.
    #[tracing::instrument(skip(self), fields(conversation_id = %conversation_id.as_uuid()))]
    pub async fn list_messages(
        &self,
        conversation_id: ConversationId,
        after_id: Option<MessageId>,
        limit: usize,
    ) -> Result<Vec<Message>, ConversationError> {
        if self
            .repository
            .get_conversation(conversation_id)
            .await?
            .is_none()
        {
            return Err(ConversationError::NotFound);
        }

        match after_id {
            Some(cursor_id) => {
                let cursor = self
                    .repository
                    .get_message(cursor_id)
                    .await?
                    .filter(|m| m.conversation_id == conversation_id)
                    .ok_or(ConversationError::InvalidCursor)?;

                Ok(self
                    .repository
                    .messages_after(conversation_id, &cursor, limit)
                    .await?)
            }
            None => Ok(self
                .repository
                .latest_messages(conversation_id, limit)
                .await?),
        }
    }

    #[tracing::instrument(skip(self, query))]
    pub async fn search(
        &self,
        query: &str,
        conversation_id: Option<ConversationId>,
        limit: usize,
    ) -> Result<Vec<SearchHit>, ConversationError> {
        Ok(self.repository.search(query, conversation_id, limit).await?)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConversationError {
    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),
    #[error("conversation not found")]
    NotFound,
    #[error("invalid cursor")]
    InvalidCursor,
    #[error("repository: {0}")]
    Repository(#[from] RepositoryError),
}
