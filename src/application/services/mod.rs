mod conversation_service;
mod ingestion_service;
mod summary_service;

pub use conversation_service::{ConversationError, ConversationService};
pub use ingestion_service::{
    IngestedMessage, IngestionError, IngestionService, TRANSCRIPTION_FALLBACK,
};
pub use summary_service::{SummaryError, SummaryService};
