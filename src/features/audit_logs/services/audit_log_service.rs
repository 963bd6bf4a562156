use sqlx::{PgExecutor, PgPool};

use crate::core::error::{AppError, Result};
use crate::features::audit_logs::dtos::AuditLogQuery;
use crate::features::audit_logs::models::{AuditLog, CreateAuditLog};
use crate::shared::types::PaginationQuery;

/// Service for audit log operations
pub struct AuditLogService {
    pool: PgPool,
}

impl AuditLogService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Append an entry using the caller's connection or transaction
    pub async fn record<'e, E>(executor: E, entry: &CreateAuditLog) -> Result<AuditLog>
    where
        E: PgExecutor<'e>,
    {
        let log = sqlx::query_as::<_, AuditLog>(
            r#"
            INSERT INTO audit_logs (actor_id, issue_id, action, details)
            VALUES ($1, $2, $3, $4)
            RETURNING id, actor_id, issue_id, action, details, created_at
            "#,
        )
        .bind(&entry.actor_id)
        .bind(entry.issue_id)
        .bind(entry.action.as_str())
        .bind(&entry.details)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            tracing::error!("Failed to write audit log: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::debug!(
            "Audit: {} by {} on {:?}",
            log.action,
            log.actor_id,
            log.issue_id
        );

        Ok(log)
    }

    /// List entries, newest first
    pub async fn list(
        &self,
        query: &AuditLogQuery,
        pagination: &PaginationQuery,
    ) -> Result<(Vec<AuditLog>, i64)> {
        let logs = sqlx::query_as::<_, AuditLog>(
            r#"
            SELECT id, actor_id, issue_id, action, details, created_at
            FROM audit_logs
            WHERE ($1::uuid IS NULL OR issue_id = $1)
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(query.issue_id)
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list audit logs: {:?}", e);
            AppError::Database(e)
        })?;

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM audit_logs WHERE ($1::uuid IS NULL OR issue_id = $1)",
        )
        .bind(query.issue_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to count audit logs: {:?}", e);
            AppError::Database(e)
        })?;

        Ok((logs, total))
    }
}
