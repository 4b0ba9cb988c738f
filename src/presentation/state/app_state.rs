use std::sync::Arc;

use crate::application::ports::AudioStorage;
use crate::application::services::{ConversationService, IngestionService, SummaryService};
use crate::presentation::config::Settings;

/// Shared handler state. Audio storage is optional: without a configured
/// bucket the presign endpoint reports the gap instead of the server refusing
/// to start.
#[derive(Clone)]
pub struct AppState {
    pub conversation_service: Arc<ConversationService>,
    pub ingestion_service: Arc<IngestionService>,
    pub summary_service: Arc<SummaryService>,
    pub audio_storage: Option<Arc<dyn AudioStorage>>,
    pub settings: Settings,
}
