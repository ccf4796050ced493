//! Notification repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use taskflow_core::error::{AppError, ErrorKind};
use taskflow_core::result::AppResult;
use taskflow_core::types::id::{NotificationId, UserId};
use taskflow_entity::notification::{Notification, NotificationPayload, NotificationType};

use crate::store::NotificationStore;

/// Row shape of the `notifications` table.
#[derive(Debug, FromRow)]
struct NotificationRow {
    id: Uuid,
    user_id: Uuid,
    actor_id: Option<Uuid>,
    notification_type: String,
    title: String,
    message: String,
    data: Json<NotificationPayload>,
    is_read: bool,
    read_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl TryFrom<NotificationRow> for Notification {
    type Error = AppError;

    fn try_from(row: NotificationRow) -> Result<Self, Self::Error> {
        let kind: NotificationType = row
            .notification_type
            .parse()
            .map_err(|e: String| AppError::new(ErrorKind::Serialization, e))?;
        let data = row.data.0;
        if data.kind() != kind {
            return Err(AppError::new(
                ErrorKind::Serialization,
                format!(
                    "Notification {} has type '{}' but payload '{}'",
                    row.id,
                    kind,
                    data.kind()
                ),
            ));
        }

        Ok(Notification {
            id: NotificationId::from(row.id),
            user_id: UserId::from(row.user_id),
            actor_id: row.actor_id.map(UserId::from),
            kind,
            title: row.title,
            message: row.message,
            data,
            is_read: row.is_read,
            read_at: row.read_at,
            created_at: row.created_at,
        })
    }
}

/// Repository for notification persistence.
#[derive(Debug, Clone)]
pub struct NotificationRepository {
    pool: PgPool,
}

impl NotificationRepository {
    /// Create a new notification repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationStore for NotificationRepository {
    async fn create(&self, notification: &Notification) -> AppResult<Notification> {
        let row = sqlx::query_as::<_, NotificationRow>(
            "INSERT INTO notifications \
             (id, user_id, actor_id, notification_type, title, message, data, is_read, read_at, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) RETURNING *",
        )
        .bind(notification.id.into_uuid())
        .bind(notification.user_id.into_uuid())
        .bind(notification.actor_id.map(UserId::into_uuid))
        .bind(notification.kind.as_str())
        .bind(&notification.title)
        .bind(&notification.message)
        .bind(Json(notification.data.clone()))
        .bind(notification.is_read)
        .bind(notification.read_at)
        .bind(notification.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create notification", e))?;

        row.try_into()
    }

    async fn find_by_user(&self, user_id: UserId) -> AppResult<Vec<Notification>> {
        let rows = sqlx::query_as::<_, NotificationRow>(
            "SELECT * FROM notifications WHERE user_id = $1 ORDER BY created_at DESC, id DESC",
        )
        .bind(user_id.into_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list notifications", e))?;

        rows.into_iter().map(Notification::try_from).collect()
    }

    async fn count_unread(&self, user_id: UserId) -> AppResult<i64> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM notifications WHERE user_id = $1 AND is_read = FALSE",
        )
        .bind(user_id.into_uuid())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count unread", e))
    }

    async fn mark_read(
        &self,
        id: NotificationId,
        user_id: UserId,
        at: DateTime<Utc>,
    ) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE notifications SET is_read = TRUE, read_at = COALESCE(read_at, $3) \
             WHERE id = $1 AND user_id = $2",
        )
        .bind(id.into_uuid())
        .bind(user_id.into_uuid())
        .bind(at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to mark read", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn mark_all_read(&self, user_id: UserId, at: DateTime<Utc>) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE notifications SET is_read = TRUE, read_at = $2 \
             WHERE user_id = $1 AND is_read = FALSE",
        )
        .bind(user_id.into_uuid())
        .bind(at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to mark all read", e))?;

        Ok(result.rows_affected())
    }
}
