use std::sync::Arc;

use crate::application::ports::{
    AiProvider, AiProviderError, ConversationRepository, RepositoryError,
};
use crate::domain::{ConversationId, Summary, SummaryStyle};

/// On-demand clinical summarization over the full message history.
///
/// Unlike the ingestion path this is NOT fail-open: a silently wrong or empty
/// clinical summary is more dangerous than a visible error, so provider
/// failures surface to the caller. Each successful call appends a new Summary
/// snapshot; earlier summaries are never superseded or overwritten.
pub struct SummaryService {
    repository: Arc<dyn ConversationRepository>,
    provider: Arc<dyn AiProvider>,
}

impl SummaryService {
    pub fn new(repository: Arc<dyn ConversationRepository>, provider: Arc<dyn AiProvider>) -> Self {
        Self {
            repository,
            provider,
        }
    }

    #[tracing::instrument(skip(self), fields(conversation_id = %conversation_id.as_uuid()))]
    pub async fn summarize(
        &self,
        conversation_id: ConversationId,
        style: SummaryStyle,
    ) -> Result<Summary, SummaryError> {
        if self
            .repository
            .get_conversation(conversation_id)
            .await?
            .is_none()
        {
            return Err(SummaryError::ConversationNotFound);
        }

        let messages = self.repository.all_messages(conversation_id).await?;

        let mut lines = Vec::with_capacity(messages.len() * 2);
        for message in &messages {
            lines.push(format!(
                "[{}] original: {}",
                message.role,
                message.source_text()
            ));
            lines.push(format!(
                "[{}] translated: {}",
                message.role, message.translated_text
            ));
        }

        let parsed = self.provider.summarize_medical(&lines, style).await?;

        let summary = Summary::new(
            conversation_id,
            parsed.summary,
            parsed.symptoms,
            parsed.diagnoses,
            parsed.medications,
            parsed.follow_up,
        );
        self.repository.append_summary(&summary).await?;

        tracing::info!(
            summary_id = %summary.id.as_uuid(),
            message_count = messages.len(),
            style = %style,
            "Summary created"
        );

        Ok(summary)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SummaryError {
    #[error("conversation not found")]
    ConversationNotFound,
    #[error("provider: {0}")]
    Provider(#[from] AiProviderError),
    #[error("repository: {0}")]
    Repository(#[from] RepositoryError),
}
