use std::str::FromStr;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::Row;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::application::ports::{ConversationRepository, RepositoryError, SearchHit};
use crate::domain::{
    Conversation, ConversationId, Language, Message, MessageId, MessageRole, Modality, Summary,
};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS conversations (
    id TEXT PRIMARY KEY,
    title TEXT,
    doctor_language TEXT NOT NULL,
    patient_language TEXT NOT NULL,
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS messages (
    id TEXT PRIMARY KEY,
    conversation_id TEXT NOT NULL REFERENCES conversations(id) ON DELETE CASCADE,
    role TEXT NOT NULL,
    modality TEXT NOT NULL,
    original_text TEXT,
    translated_text TEXT NOT NULL,
    transcript_text TEXT,
    audio_url TEXT,
    source_language TEXT NOT NULL,
    target_language TEXT NOT NULL,
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS ix_messages_conversation_created_id
    ON messages (conversation_id, created_at, id);

CREATE TABLE IF NOT EXISTS summaries (
    id TEXT PRIMARY KEY,
    conversation_id TEXT NOT NULL REFERENCES conversations(id) ON DELETE CASCADE,
    summary_text TEXT NOT NULL,
    symptoms TEXT NOT NULL,
    diagnoses TEXT NOT NULL,
    medications TEXT NOT NULL,
    follow_up TEXT NOT NULL,
    created_at TEXT NOT NULL
);
"#;

const MESSAGE_COLUMNS: &str = "id, conversation_id, role, modality, original_text, \
     translated_text, transcript_text, audio_url, source_language, target_language, created_at";

const SNIPPET_CHARS: usize = 220;

/// SQLite-backed repository for local development and tests. Search is a
/// case-insensitive substring match with the snippet assembled in Rust, since
/// the engine has no headline function.
pub struct SqliteConversationRepository {
    pool: SqlitePool,
}

impl SqliteConversationRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    #[instrument(skip(url))]
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, RepositoryError> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        info!("SQLite connection pool established");
        Ok(Self { pool })
    }

    pub async fn init_schema(&self) -> Result<(), RepositoryError> {
        sqlx::raw_sql(SCHEMA)
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;
        Ok(())
    }
}

fn query_failed(e: impl ToString) -> RepositoryError {
    RepositoryError::QueryFailed(e.to_string())
}

fn parse_uuid(raw: &str) -> Result<Uuid, RepositoryError> {
    Uuid::parse_str(raw).map_err(query_failed)
}

fn message_from_row(row: &SqliteRow) -> Result<Message, RepositoryError> {
    let id: String = row.try_get("id").map_err(query_failed)?;
    let conversation_id: String = row.try_get("conversation_id").map_err(query_failed)?;
    let role: String = row.try_get("role").map_err(query_failed)?;
    let modality: String = row.try_get("modality").map_err(query_failed)?;
    let source: String = row.try_get("source_language").map_err(query_failed)?;
    let target: String = row.try_get("target_language").map_err(query_failed)?;

    Ok(Message {
        id: MessageId::from_uuid(parse_uuid(&id)?),
        conversation_id: ConversationId::from_uuid(parse_uuid(&conversation_id)?),
        role: role.parse::<MessageRole>().map_err(query_failed)?,
        modality: modality.parse::<Modality>().map_err(query_failed)?,
        original_text: row.try_get("original_text").map_err(query_failed)?,
        translated_text: row.try_get("translated_text").map_err(query_failed)?,
        transcript_text: row.try_get("transcript_text").map_err(query_failed)?,
        audio_url: row.try_get("audio_url").map_err(query_failed)?,
        source_language: source.parse::<Language>().map_err(query_failed)?,
        target_language: target.parse::<Language>().map_err(query_failed)?,
        created_at: row.try_get("created_at").map_err(query_failed)?,
    })
}

/// Snippet source preference mirrors what a reader would consider the message
/// text: original, then transcript, then translation.
fn snippet_for(message: &Message) -> String {
    let source = [
        message.original_text.as_deref(),
        message.transcript_text.as_deref(),
        Some(message.translated_text.as_str()),
    ]
    .into_iter()
    .flatten()
    .find(|s| !s.is_empty())
    .unwrap_or("");

    source.chars().take(SNIPPET_CHARS).collect()
}

#[async_trait]
impl ConversationRepository for SqliteConversationRepository {
    #[instrument(skip(self, conversation), fields(conversation_id = %conversation.id.as_uuid()))]
    async fn create_conversation(
        &self,
        conversation: &Conversation,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO conversations (id, title, doctor_language, patient_language, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(conversation.id.as_uuid().to_string())
        .bind(&conversation.title)
        .bind(conversation.doctor_language.as_str())
        .bind(conversation.patient_language.as_str())
        .bind(conversation.created_at)
        .execute(&self.pool)
        .await
        .map_err(query_failed)?;

        Ok(())
    }

    #[instrument(skip(self), fields(conversation_id = %id.as_uuid()))]
    async fn get_conversation(
        &self,
        id: ConversationId,
    ) -> Result<Option<Conversation>, RepositoryError> {
        let row = sqlx::query(
            r#"
            SELECT id, title, doctor_language, patient_language, created_at
            FROM conversations
            WHERE id = ?1
            "#,
        )
        .bind(id.as_uuid().to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(query_failed)?;

        row.map(|r| {
            let raw_id: String = r.try_get("id").map_err(query_failed)?;
            let doctor: String = r.try_get("doctor_language").map_err(query_failed)?;
            let patient: String = r.try_get("patient_language").map_err(query_failed)?;

            Ok(Conversation {
                id: ConversationId::from_uuid(parse_uuid(&raw_id)?),
                title: r.try_get("title").map_err(query_failed)?,
                doctor_language: doctor.parse::<Language>().map_err(query_failed)?,
                patient_language: patient.parse::<Language>().map_err(query_failed)?,
                created_at: r.try_get("created_at").map_err(query_failed)?,
            })
        })
        .transpose()
    }

    #[instrument(skip(self, message), fields(message_id = %message.id.as_uuid(), conversation_id = %message.conversation_id.as_uuid()))]
    async fn append_message(&self, message: &Message) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO messages (id, conversation_id, role, modality, original_text,
                translated_text, transcript_text, audio_url, source_language,
                target_language, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            "#,
        )
        .bind(message.id.as_uuid().to_string())
        .bind(message.conversation_id.as_uuid().to_string())
        .bind(message.role.as_str())
        .bind(message.modality.as_str())
        .bind(&message.original_text)
        .bind(&message.translated_text)
        .bind(&message.transcript_text)
        .bind(&message.audio_url)
        .bind(message.source_language.as_str())
        .bind(message.target_language.as_str())
        .bind(message.created_at)
        .execute(&self.pool)
        .await
        .map_err(query_failed)?;

        Ok(())
    }

    async fn get_message(&self, id: MessageId) -> Result<Option<Message>, RepositoryError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM messages WHERE id = ?1",
            MESSAGE_COLUMNS
        ))
        .bind(id.as_uuid().to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(query_failed)?;

        row.as_ref().map(message_from_row).transpose()
    }

    #[instrument(skip(self, cursor), fields(conversation_id = %conversation_id.as_uuid(), limit = %limit))]
    async fn messages_after(
        &self,
        conversation_id: ConversationId,
        cursor: &Message,
        limit: usize,
    ) -> Result<Vec<Message>, RepositoryError> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {}
            FROM messages
            WHERE conversation_id = ?1
              AND (created_at > ?2 OR (created_at = ?2 AND id > ?3))
            ORDER BY created_at ASC, id ASC
            LIMIT ?4
            "#,
            MESSAGE_COLUMNS
        ))
        .bind(conversation_id.as_uuid().to_string())
        .bind(cursor.created_at)
        .bind(cursor.id.as_uuid().to_string())
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(query_failed)?;

        rows.iter().map(message_from_row).collect()
    }

    #[instrument(skip(self), fields(conversation_id = %conversation_id.as_uuid(), limit = %limit))]
    async fn latest_messages(
        &self,
        conversation_id: ConversationId,
        limit: usize,
    ) -> Result<Vec<Message>, RepositoryError> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {}
            FROM messages
            WHERE conversation_id = ?1
            ORDER BY created_at DESC, id DESC
            LIMIT ?2
            "#,
            MESSAGE_COLUMNS
        ))
        .bind(conversation_id.as_uuid().to_string())
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(query_failed)?;

        let mut messages: Vec<Message> =
            rows.iter().map(message_from_row).collect::<Result<_, _>>()?;

        messages.reverse();
        Ok(messages)
    }

    async fn all_messages(
        &self,
        conversation_id: ConversationId,
    ) -> Result<Vec<Message>, RepositoryError> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {}
            FROM messages
            WHERE conversation_id = ?1
            ORDER BY created_at ASC, id ASC
            "#,
            MESSAGE_COLUMNS
        ))
        .bind(conversation_id.as_uuid().to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(query_failed)?;

        rows.iter().map(message_from_row).collect()
    }

    #[instrument(skip(self, summary), fields(summary_id = %summary.id.as_uuid(), conversation_id = %summary.conversation_id.as_uuid()))]
    async fn append_summary(&self, summary: &Summary) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO summaries (id, conversation_id, summary_text, symptoms,
                diagnoses, medications, follow_up, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(summary.id.as_uuid().to_string())
        .bind(summary.conversation_id.as_uuid().to_string())
        .bind(&summary.summary_text)
        .bind(serde_json::to_string(&summary.symptoms).map_err(query_failed)?)
        .bind(serde_json::to_string(&summary.diagnoses).map_err(query_failed)?)
        .bind(serde_json::to_string(&summary.medications).map_err(query_failed)?)
        .bind(serde_json::to_string(&summary.follow_up).map_err(query_failed)?)
        .bind(summary.created_at)
        .execute(&self.pool)
        .await
        .map_err(query_failed)?;

        Ok(())
    }

    #[instrument(skip(self, query), fields(limit = %limit))]
    async fn search(
        &self,
        query: &str,
        conversation_id: Option<ConversationId>,
        limit: usize,
    ) -> Result<Vec<SearchHit>, RepositoryError> {
        let pattern = format!("%{}%", query.to_lowercase());

        let rows = sqlx::query(&format!(
            r#"
            SELECT {}
            FROM messages
            WHERE (lower(coalesce(original_text, '')) LIKE ?1
                OR lower(coalesce(transcript_text, '')) LIKE ?1
                OR lower(coalesce(translated_text, '')) LIKE ?1)
              AND (?2 IS NULL OR conversation_id = ?2)
            ORDER BY created_at DESC, id DESC
            LIMIT ?3
            "#,
            MESSAGE_COLUMNS
        ))
        .bind(&pattern)
        .bind(conversation_id.map(|c| c.as_uuid().to_string()))
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(query_failed)?;

        rows.iter()
            .map(|row| {
                let message = message_from_row(row)?;
                Ok(SearchHit {
                    snippet: snippet_for(&message),
                    message_id: message.id,
                    conversation_id: message.conversation_id,
                    role: message.role,
                    created_at: message.created_at,
                })
            })
            .collect()
    }
}
