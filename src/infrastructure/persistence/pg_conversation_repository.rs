use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::instrument;
use uuid::Uuid;

use crate::application::ports::{ConversationRepository, RepositoryError, SearchHit};
use crate::domain::{
    Conversation, ConversationId, Language, Message, MessageId, MessageRole, Modality, Summary,
};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS conversations (
    id UUID PRIMARY KEY,
    title TEXT,
    doctor_language TEXT NOT NULL,
    patient_language TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL
);

CREATE TABLE IF NOT EXISTS messages (
    id UUID PRIMARY KEY,
    conversation_id UUID NOT NULL REFERENCES conversations(id) ON DELETE CASCADE,
    role TEXT NOT NULL,
    modality TEXT NOT NULL,
    original_text TEXT,
    translated_text TEXT NOT NULL,
    transcript_text TEXT,
    audio_url TEXT,
    source_language TEXT NOT NULL,
    target_language TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL
);

CREATE INDEX IF NOT EXISTS ix_messages_conversation_created_id
    ON messages (conversation_id, created_at, id);

CREATE TABLE IF NOT EXISTS summaries (
    id UUID PRIMARY KEY,
    conversation_id UUID NOT NULL REFERENCES conversations(id) ON DELETE CASCADE,
    summary_text TEXT NOT NULL,
    symptoms TEXT NOT NULL,
    diagnoses TEXT NOT NULL,
    medications TEXT NOT NULL,
    follow_up TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL
);
"#;

const MESSAGE_COLUMNS: &str = "id, conversation_id, role, modality, original_text, \
     translated_text, transcript_text, audio_url, source_language, target_language, created_at";

/// Postgres-backed repository. Search uses the engine's native full-text
/// ranking and ts_headline highlighting.
pub struct PgConversationRepository {
    pool: PgPool,
}

impl PgConversationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
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

fn message_from_row(row: &PgRow) -> Result<Message, RepositoryError> {
    let role: String = row.try_get("role").map_err(query_failed)?;
    let modality: String = row.try_get("modality").map_err(query_failed)?;
    let source: String = row.try_get("source_language").map_err(query_failed)?;
    let target: String = row.try_get("target_language").map_err(query_failed)?;

    Ok(Message {
        id: MessageId::from_uuid(row.try_get::<Uuid, _>("id").map_err(query_failed)?),
        conversation_id: ConversationId::from_uuid(
            row.try_get::<Uuid, _>("conversation_id")
                .map_err(query_failed)?,
        ),
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

#[async_trait]
impl ConversationRepository for PgConversationRepository {
    #[instrument(skip(self, conversation), fields(conversation_id = %conversation.id.as_uuid()))]
    async fn create_conversation(
        &self,
        conversation: &Conversation,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO conversations (id, title, doctor_language, patient_language, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(conversation.id.as_uuid())
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
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(query_failed)?;

        row.map(|r| {
            let doctor: String = r.try_get("doctor_language").map_err(query_failed)?;
            let patient: String = r.try_get("patient_language").map_err(query_failed)?;

            Ok(Conversation {
                id: ConversationId::from_uuid(r.try_get::<Uuid, _>("id").map_err(query_failed)?),
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
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(message.id.as_uuid())
        .bind(message.conversation_id.as_uuid())
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
            "SELECT {} FROM messages WHERE id = $1",
            MESSAGE_COLUMNS
        ))
        .bind(id.as_uuid())
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
            WHERE conversation_id = $1
              AND (created_at > $2 OR (created_at = $2 AND id > $3))
            ORDER BY created_at ASC, id ASC
            LIMIT $4
            "#,
            MESSAGE_COLUMNS
        ))
        .bind(conversation_id.as_uuid())
        .bind(cursor.created_at)
        .bind(cursor.id.as_uuid())
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
            WHERE conversation_id = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2
            "#,
            MESSAGE_COLUMNS
        ))
        .bind(conversation_id.as_uuid())
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(query_failed)?;

        let mut messages: Vec<Message> =
            rows.iter().map(message_from_row).collect::<Result<_, _>>()?;

        // Fetched newest-first; pages are always presented in canonical
        // ascending order.
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
            WHERE conversation_id = $1
            ORDER BY created_at ASC, id ASC
            "#,
            MESSAGE_COLUMNS
        ))
        .bind(conversation_id.as_uuid())
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
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(summary.id.as_uuid())
        .bind(summary.conversation_id.as_uuid())
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
        let rows = sqlx::query(
            r#"
            SELECT id, conversation_id, role, created_at,
                   ts_headline('english',
                     coalesce(original_text,'') || ' ' || coalesce(transcript_text,'') || ' ' || coalesce(translated_text,''),
                     plainto_tsquery('english', $1)
                   ) AS snippet
            FROM messages
            WHERE to_tsvector('english', coalesce(original_text,'') || ' ' || coalesce(transcript_text,'') || ' ' || coalesce(translated_text,''))
                  @@ plainto_tsquery('english', $1)
              AND ($2::uuid IS NULL OR conversation_id = $2)
            ORDER BY created_at DESC, id DESC
            LIMIT $3
            "#,
        )
        .bind(query)
        .bind(conversation_id.map(|c| c.as_uuid()))
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(query_failed)?;

        rows.iter()
            .map(|row| {
                let role: String = row.try_get("role").map_err(query_failed)?;
                Ok(SearchHit {
                    message_id: MessageId::from_uuid(
                        row.try_get::<Uuid, _>("id").map_err(query_failed)?,
                    ),
                    conversation_id: ConversationId::from_uuid(
                        row.try_get::<Uuid, _>("conversation_id")
                            .map_err(query_failed)?,
                    ),
                    role: role.parse::<MessageRole>().map_err(query_failed)?,
                    created_at: row.try_get("created_at").map_err(query_failed)?,
                    snippet: row.try_get("snippet").map_err(query_failed)?,
                })
            })
            .collect()
    }
}
