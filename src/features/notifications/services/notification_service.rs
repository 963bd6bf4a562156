use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::notifications::models::{CreateNotification, Notification};
use crate::shared::types::PaginationQuery;

const NOTIFICATION_COLUMNS: &str = "id, user_id, issue_id, title, message, is_read, created_at";

/// Service for notification operations
pub struct NotificationService {
    pool: PgPool,
}

impl NotificationService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a notification using the caller's connection or transaction
    pub async fn create<'e, E>(executor: E, data: &CreateNotification) -> Result<Notification>
    where
        E: PgExecutor<'e>,
    {
        let sql = format!(
            "INSERT INTO notifications (user_id, issue_id, title, message) \
             VALUES ($1, $2, $3, $4) RETURNING {}",
            NOTIFICATION_COLUMNS
        );

        let notification = sqlx::query_as::<_, Notification>(&sql)
            .bind(&data.user_id)
            .bind(data.issue_id)
            .bind(&data.title)
            .bind(&data.message)
            .fetch_one(executor)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create notification: {:?}", e);
                AppError::Database(e)
            })?;

        tracing::info!(
            "Notification {} created for user {}",
            notification.id,
            notification.user_id
        );

        Ok(notification)
    }

    /// The caller's notifications, newest first, with the total count
    pub async fn list_for_user(
        &self,
        user_id: &str,
        pagination: &PaginationQuery,
    ) -> Result<(Vec<Notification>, i64)> {
        let sql = format!(
            "SELECT {} FROM notifications WHERE user_id = $1 \
             ORDER BY created_at DESC LIMIT $2 OFFSET $3",
            NOTIFICATION_COLUMNS
        );

        let notifications = sqlx::query_as::<_, Notification>(&sql)
            .bind(user_id)
            .bind(pagination.limit())
            .bind(pagination.offset())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list notifications: {:?}", e);
                AppError::Database(e)
            })?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM notifications WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to count notifications: {:?}", e);
                AppError::Database(e)
            })?;

        Ok((notifications, total))
    }

    /// Mark one of the caller's notifications as read
    pub async fn mark_read(&self, id: Uuid, user_id: &str) -> Result<Notification> {
        let sql = format!(
            "UPDATE notifications SET is_read = TRUE \
             WHERE id = $1 AND user_id = $2 RETURNING {}",
            NOTIFICATION_COLUMNS
        );

        sqlx::query_as::<_, Notification>(&sql)
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to mark notification {} read: {:?}", id, e);
                AppError::Database(e)
            })?
            .ok_or_else(|| AppError::NotFound(format!("Notification {} not found", id)))
    }
}
