mod pg_conversation_repository;
mod pg_pool;
mod repository_factory;
mod sqlite_conversation_repository;

pub use pg_conversation_repository::PgConversationRepository;
pub use pg_pool::create_pool;
pub use repository_factory::RepositoryFactory;
pub use sqlite_conversation_repository::SqliteConversationRepository;
