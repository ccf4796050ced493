//! Mention repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use taskflow_core::error::{AppError, ErrorKind};
use taskflow_core::result::AppResult;
use taskflow_core::types::id::{MentionId, MessageId, UserId};
use taskflow_entity::mention::Mention;

use crate::store::MentionStore;

#[derive(Debug, FromRow)]
struct MentionRow {
    id: Uuid,
    message_id: Uuid,
    user_id: Uuid,
    created_at: DateTime<Utc>,
}

impl From<MentionRow> for Mention {
    fn from(row: MentionRow) -> Self {
        Self {
            id: MentionId::from(row.id),
            message_id: MessageId::from(row.message_id),
            user_id: UserId::from(row.user_id),
            created_at: row.created_at,
        }
    }
}

/// Repository for mention persistence.
#[derive(Debug, Clone)]
pub struct MentionRepository {
    pool: PgPool,
}

impl MentionRepository {
    /// Create a new mention repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MentionStore for MentionRepository {
    async fn create_many(&self, mentions: &[Mention]) -> AppResult<u64> {
        if mentions.is_empty() {
            return Ok(0);
        }

        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("INSERT INTO mentions (id, message_id, user_id, created_at) ");
        builder.push_values(mentions, |mut row, mention| {
            row.push_bind(mention.id.into_uuid())
                .push_bind(mention.message_id.into_uuid())
                .push_bind(mention.user_id.into_uuid())
                .push_bind(mention.created_at);
        });
        builder.push(" ON CONFLICT (message_id, user_id) DO NOTHING");

        let result = builder
            .build()
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create mentions", e))?;

        Ok(result.rows_affected())
    }

    async fn find_by_message(&self, message_id: MessageId) -> AppResult<Vec<Mention>> {
        let rows = sqlx::query_as::<_, MentionRow>(
            "SELECT * FROM mentions WHERE message_id = $1 ORDER BY created_at",
        )
        .bind(message_id.into_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find mentions", e))?;

        Ok(rows.into_iter().map(Mention::from).collect())
    }
}
