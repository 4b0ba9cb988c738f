use std::sync::Arc;

use tracing::info;

use crate::application::ports::{ConversationRepository, RepositoryError};
use crate::presentation::config::DatabaseSettings;

use super::pg_pool::create_pool;
use super::{PgConversationRepository, SqliteConversationRepository};

/// Picks the storage engine from the database URL scheme, once, at startup.
/// Everything above the [`ConversationRepository`] port is engine-agnostic;
/// the search strategy travels with the chosen implementation.
pub struct RepositoryFactory;

impl RepositoryFactory {
    pub async fn create(
        settings: &DatabaseSettings,
    ) -> Result<Arc<dyn ConversationRepository>, RepositoryError> {
        let url = settings.url.as_str();

        if url.starts_with("postgres://") || url.starts_with("postgresql://") {
            let pool = create_pool(url, settings.max_connections).await?;
            let repository = PgConversationRepository::new(pool);
            repository.init_schema().await?;
            info!("Using PostgreSQL repository with full-text search");
            return Ok(Arc::new(repository));
        }

        if url.starts_with("sqlite:") {
            let repository =
                SqliteConversationRepository::connect(url, settings.max_connections).await?;
            repository.init_schema().await?;
            info!("Using SQLite repository with substring search");
            return Ok(Arc::new(repository));
        }

        Err(RepositoryError::ConnectionFailed(format!(
            "unsupported database url scheme: {}",
            url
        )))
    }
}
