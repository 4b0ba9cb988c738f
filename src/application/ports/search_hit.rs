use chrono::{DateTime, Utc};

use crate::domain::{ConversationId, MessageId, MessageRole};

/// One search result, normalized to the same shape by both storage engines.
#[derive(Debug, Clone)]
pub struct SearchHit {
    pub message_id: MessageId,
    pub conversation_id: ConversationId,
    pub role: MessageRole,
    pub created_at: DateTime<Utc>,
    pub snippet: String,
}
