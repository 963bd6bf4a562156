use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::feedback::models::{CreateFeedback, Feedback};
use crate::features::issues::models::{Issue, IssueStatus};
use crate::shared::types::PaginationQuery;

const FEEDBACK_COLUMNS: &str = "id, issue_id, user_id, rating, comment, created_at";

/// Only the reporter of a resolved issue may rate it
fn ensure_feedback_allowed(issue: &Issue, user_id: &str) -> Result<()> {
    issue.ensure_owner(user_id)?;
    if issue.status != IssueStatus::Resolved {
        return Err(AppError::Conflict(
            "Feedback can only be given once the issue is resolved".to_string(),
        ));
    }
    Ok(())
}

/// Service for feedback operations
pub struct FeedbackService {
    pool: PgPool,
}

impl FeedbackService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Record feedback; a reporter can rate an issue once
    pub async fn create(&self, data: &CreateFeedback) -> Result<Feedback> {
        let sql = format!("SELECT {} FROM issues WHERE id = $1", Issue::COLUMNS);
        let issue = sqlx::query_as::<_, Issue>(&sql)
            .bind(data.issue_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to load issue {}: {:?}", data.issue_id, e);
                AppError::Database(e)
            })?
            .ok_or_else(|| AppError::NotFound(format!("Issue {} not found", data.issue_id)))?;

        ensure_feedback_allowed(&issue, &data.user_id)?;

        let sql = format!(
            "INSERT INTO feedback (issue_id, user_id, rating, comment) \
             VALUES ($1, $2, $3, $4) RETURNING {}",
            FEEDBACK_COLUMNS
        );
        let feedback = sqlx::query_as::<_, Feedback>(&sql)
            .bind(data.issue_id)
            .bind(&data.user_id)
            .bind(data.rating)
            .bind(&data.comment)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match AppError::from_write(e) {
                AppError::Conflict(_) => {
                    AppError::Conflict("Feedback already submitted for this issue".to_string())
                }
                other => {
                    tracing::error!("Failed to create feedback: {:?}", other);
                    other
                }
            })?;

        tracing::info!(
            "Feedback {} (rating {}) recorded for issue {}",
            feedback.id,
            feedback.rating,
            feedback.issue_id
        );

        Ok(feedback)
    }

    /// All feedback, newest first
    pub async fn list(&self, pagination: &PaginationQuery) -> Result<(Vec<Feedback>, i64)> {
        let sql = format!(
            "SELECT {} FROM feedback ORDER BY created_at DESC LIMIT $1 OFFSET $2",
            FEEDBACK_COLUMNS
        );
        let feedback = sqlx::query_as::<_, Feedback>(&sql)
            .bind(pagination.limit())
            .bind(pagination.offset())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list feedback: {:?}", e);
                AppError::Database(e)
            })?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM feedback")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to count feedback: {:?}", e);
                AppError::Database(e)
            })?;

        Ok((feedback, total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::issues::models::fixtures::issue;

    #[test]
    fn test_feedback_requires_resolved_issue() {
        let pending = issue("Water leaking from main pipe");
        assert!(matches!(
            ensure_feedback_allowed(&pending, "reporter-1"),
            Err(AppError::Conflict(_))
        ));

        let resolved = Issue {
            status: IssueStatus::Resolved,
            ..pending
        };
        assert!(ensure_feedback_allowed(&resolved, "reporter-1").is_ok());
    }

    #[test]
    fn test_feedback_requires_reporter() {
        let resolved = Issue {
            status: IssueStatus::Resolved,
            ..issue("Water leaking from main pipe")
        };
        assert!(matches!(
            ensure_feedback_allowed(&resolved, "neighbour"),
            Err(AppError::Forbidden(_))
        ));
    }
}
