use async_trait::async_trait;

use crate::domain::{Conversation, ConversationId, Message, MessageId, Summary};

use super::{RepositoryError, SearchHit};

/// Ordered record store for conversations, messages and summaries.
///
/// The canonical message order is (created_at ASC, id ASC); created_at is not
/// unique, so every ordering decision breaks ties on the id. Implementations
/// also carry the search strategy native to their storage engine, chosen once
/// at startup by the repository factory.
#[async_trait]
pub trait ConversationRepository: Send + Sync {
    async fn create_conversation(&self, conversation: &Conversation)
    -> Result<(), RepositoryError>;

    async fn get_conversation(
        &self,
        id: ConversationId,
    ) -> Result<Option<Conversation>, RepositoryError>;

    async fn append_message(&self, message: &Message) -> Result<(), RepositoryError>;

    async fn get_message(&self, id: MessageId) -> Result<Option<Message>, RepositoryError>;

    /// Up to `limit` messages strictly after the cursor message in canonical
    /// order. The cursor is passed as a full record; resolving and validating
    /// it is the caller's job.
    async fn messages_after(
        &self,
        conversation_id: ConversationId,
        cursor: &Message,
        limit: usize,
    ) -> Result<Vec<Message>, RepositoryError>;

    /// The most recent `limit` messages, returned in canonical (ascending)
    /// order so every page reads in the same chronological orientation.
    async fn latest_messages(
        &self,
        conversation_id: ConversationId,
        limit: usize,
    ) -> Result<Vec<Message>, RepositoryError>;

    /// Full message history in canonical order.
    async fn all_messages(
        &self,
        conversation_id: ConversationId,
    ) -> Result<Vec<Message>, RepositoryError>;

    async fn append_summary(&self, summary: &Summary) -> Result<(), RepositoryError>;

    /// Full-text or substring search depending on the engine, normalized to
    /// [`SearchHit`] and ordered by (created_at DESC, id DESC).
    async fn search(
        &self,
        query: &str,
        conversation_id: Option<ConversationId>,
        limit: usize,
    ) -> Result<Vec<SearchHit>, RepositoryError>;
}
