use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::comments::models::{Comment, CreateComment};

/// Service for comment operations
pub struct CommentService {
    pool: PgPool,
}

impl CommentService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn ensure_issue_exists(&self, issue_id: Uuid) -> Result<()> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM issues WHERE id = $1)")
            .bind(issue_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to check issue {}: {:?}", issue_id, e);
                AppError::Database(e)
            })?;

        if exists {
            Ok(())
        } else {
            Err(AppError::NotFound(format!("Issue {} not found", issue_id)))
        }
    }

    /// Comments on an issue, oldest first.
    ///
    /// A withdrawn issue has no comments left to show, so this is a 404.
    pub async fn list_by_issue(&self, issue_id: Uuid) -> Result<Vec<Comment>> {
        self.ensure_issue_exists(issue_id).await?;

        sqlx::query_as::<_, Comment>(
            r#"
            SELECT id, issue_id, user_id, content, created_at
            FROM comments
            WHERE issue_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(issue_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list comments for issue {}: {:?}", issue_id, e);
            AppError::Database(e)
        })
    }

    pub async fn create(&self, data: &CreateComment) -> Result<Comment> {
        self.ensure_issue_exists(data.issue_id).await?;

        let comment = sqlx::query_as::<_, Comment>(
            r#"
            INSERT INTO comments (issue_id, user_id, content)
            VALUES ($1, $2, $3)
            RETURNING id, issue_id, user_id, content, created_at
            "#,
        )
        .bind(data.issue_id)
        .bind(&data.user_id)
        .bind(data.content.trim())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create comment: {:?}", e);
            // Issue withdrawn after the existence check
            AppError::from_write(e)
        })?;

        tracing::info!(
            "Comment {} added to issue {} by {}",
            comment.id,
            comment.issue_id,
            comment.user_id
        );

        Ok(comment)
    }
}
