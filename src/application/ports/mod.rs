mod ai_provider;
mod audio_fetcher;
mod audio_storage;
mod conversation_repository;
mod repository_error;
mod search_hit;

pub use ai_provider::{AiProvider, AiProviderError, MedicalSummary};
pub use audio_fetcher::{AudioFetchError, AudioFetcher};
pub use audio_storage::{AudioStorage, AudioStorageError, PresignedUpload};
pub use conversation_repository::ConversationRepository;
pub use repository_error::RepositoryError;
pub use search_hit::SearchHit;
