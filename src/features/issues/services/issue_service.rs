use chrono::Utc;
use serde_json::json;
use sqlx::{PgConnection, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::audit_logs::models::{AuditAction, CreateAuditLog};
use crate::features::audit_logs::AuditLogService;
use crate::features::issues::models::{
    AuthorityUpdate, CreateIssue, Issue, IssueFilter, UpdateIssue,
};
use crate::features::notifications::models::CreateNotification;
use crate::features::notifications::NotificationService;
use crate::shared::types::PaginationQuery;

/// Service for issue operations
pub struct IssueService {
    pool: PgPool,
}

impl IssueService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Report a new issue
    pub async fn create(&self, data: &CreateIssue) -> Result<Issue> {
        let sql = format!(
            r#"
            INSERT INTO issues (
                user_id, title, description, category, priority, address,
                latitude, longitude, image_url, audio_url
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {}
            "#,
            Issue::COLUMNS
        );

        let issue = sqlx::query_as::<_, Issue>(&sql)
            .bind(&data.user_id)
            .bind(&data.title)
            .bind(&data.description)
            .bind(data.category)
            .bind(data.priority)
            .bind(&data.address)
            .bind(data.latitude)
            .bind(data.longitude)
            .bind(&data.image_url)
            .bind(&data.audio_url)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create issue: {:?}", e);
                AppError::from_write(e)
            })?;

        tracing::info!(
            "Created issue {} ({}) for user {}",
            issue.id,
            issue.category,
            issue.user_id
        );

        Ok(issue)
    }

    /// Get issue by ID
    pub async fn get_by_id(&self, id: Uuid) -> Result<Issue> {
        let sql = format!("SELECT {} FROM issues WHERE id = $1", Issue::COLUMNS);

        sqlx::query_as::<_, Issue>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get issue {}: {:?}", id, e);
                AppError::Database(e)
            })?
            .ok_or_else(|| AppError::NotFound(format!("Issue {} not found", id)))
    }

    /// Issues reported by a user, newest first
    pub async fn list_by_user(&self, user_id: &str) -> Result<Vec<Issue>> {
        let sql = format!(
            "SELECT {} FROM issues WHERE user_id = $1 ORDER BY created_at DESC",
            Issue::COLUMNS
        );

        sqlx::query_as::<_, Issue>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list issues for user {}: {:?}", user_id, e);
                AppError::Database(e)
            })
    }

    fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, filter: &IssueFilter) {
        if let Some(status) = filter.status {
            qb.push(" AND status = ").push_bind(status);
        }
        if let Some(category) = filter.category {
            qb.push(" AND category = ").push_bind(category);
        }
        if let Some(priority) = filter.priority {
            qb.push(" AND priority = ").push_bind(priority);
        }
        if let Some(department_id) = filter.department_id {
            qb.push(" AND department_id = ").push_bind(department_id);
        }
    }

    /// Filtered, paginated issue list for the authority portal
    pub async fn list(
        &self,
        filter: &IssueFilter,
        pagination: &PaginationQuery,
    ) -> Result<(Vec<Issue>, i64)> {
        let mut qb = QueryBuilder::<Postgres>::new(format!(
            "SELECT {} FROM issues WHERE TRUE",
            Issue::COLUMNS
        ));
        Self::push_filters(&mut qb, filter);
        qb.push(" ORDER BY created_at DESC LIMIT ")
            .push_bind(pagination.limit())
            .push(" OFFSET ")
            .push_bind(pagination.offset());

        let issues = qb
            .build_query_as::<Issue>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list issues: {:?}", e);
                AppError::Database(e)
            })?;

        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM issues WHERE TRUE");
        Self::push_filters(&mut count, filter);
        let total: i64 = count
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to count issues: {:?}", e);
                AppError::Database(e)
            })?;

        Ok((issues, total))
    }

    /// Lock an issue row for the rest of the transaction
    async fn lock(conn: &mut PgConnection, id: Uuid) -> Result<Issue> {
        let sql = format!(
            "SELECT {} FROM issues WHERE id = $1 FOR UPDATE",
            Issue::COLUMNS
        );

        sqlx::query_as::<_, Issue>(&sql)
            .bind(id)
            .fetch_optional(conn)
            .await
            .map_err(|e| {
                tracing::error!("Failed to lock issue {}: {:?}", id, e);
                AppError::Database(e)
            })?
            .ok_or_else(|| AppError::NotFound(format!("Issue {} not found", id)))
    }

    async fn begin(&self) -> Result<sqlx::Transaction<'static, Postgres>> {
        self.pool.begin().await.map_err(|e| {
            tracing::error!("Failed to start transaction: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn commit(tx: sqlx::Transaction<'static, Postgres>) -> Result<()> {
        tx.commit().await.map_err(|e| {
            tracing::error!("Failed to commit transaction: {:?}", e);
            AppError::Database(e)
        })
    }

    /// Add one complaint to an existing open issue instead of filing a new one.
    ///
    /// The row is locked so concurrent supports are all counted.
    pub async fn support(&self, id: Uuid, supporter_id: &str) -> Result<Issue> {
        let mut tx = self.begin().await?;
        let current = Self::lock(&mut tx, id).await?;
        let (count, priority) = current.support_outcome()?;

        let sql = format!(
            "UPDATE issues SET complaint_count = $2, priority = $3, updated_at = NOW() \
             WHERE id = $1 RETURNING {}",
            Issue::COLUMNS
        );
        let issue = sqlx::query_as::<_, Issue>(&sql)
            .bind(id)
            .bind(count)
            .bind(priority)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| {
                tracing::error!("Failed to support issue {}: {:?}", id, e);
                AppError::Database(e)
            })?;

        Self::commit(tx).await?;

        tracing::info!(
            "Issue {} supported by {}: complaint_count {} -> {}, priority {} -> {}",
            id,
            supporter_id,
            current.complaint_count,
            issue.complaint_count,
            current.priority,
            issue.priority
        );

        Ok(issue)
    }

    /// Reporter edit of title, description or category while still pending
    pub async fn update_by_reporter(
        &self,
        id: Uuid,
        user_id: &str,
        data: &UpdateIssue,
    ) -> Result<Issue> {
        if data.title.is_none() && data.description.is_none() && data.category.is_none() {
            return Err(AppError::BadRequest("No fields to update".to_string()));
        }

        let current = self.get_by_id(id).await?;
        current.ensure_citizen_editable(user_id)?;

        let sql = format!(
            r#"
            UPDATE issues
            SET title = COALESCE($3, title),
                description = COALESCE($4, description),
                category = COALESCE($5, category),
                updated_at = NOW()
            WHERE id = $1 AND user_id = $2 AND status = 'pending'
            RETURNING {}
            "#,
            Issue::COLUMNS
        );

        // Status may have moved on between the check and the write
        let issue = sqlx::query_as::<_, Issue>(&sql)
            .bind(id)
            .bind(user_id)
            .bind(&data.title)
            .bind(&data.description)
            .bind(data.category)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to update issue {}: {:?}", id, e);
                AppError::Database(e)
            })?
            .ok_or_else(|| AppError::Conflict("Issue can no longer be edited".to_string()))?;

        tracing::info!("Issue {} edited by reporter {}", id, user_id);

        Ok(issue)
    }

    /// Reporter deletes their own issue. Comments and feedback go with it.
    pub async fn withdraw(&self, id: Uuid, user_id: &str) -> Result<()> {
        let mut tx = self.begin().await?;
        let current = Self::lock(&mut tx, id).await?;
        current.ensure_owner(user_id)?;

        sqlx::query("DELETE FROM issues WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                tracing::error!("Failed to withdraw issue {}: {:?}", id, e);
                AppError::Database(e)
            })?;

        let entry = CreateAuditLog::for_issue(
            user_id,
            id,
            AuditAction::IssueWithdrawn,
            json!({
                "title": current.title,
                "status": current.status,
                "complaint_count": current.complaint_count,
            }),
        );
        AuditLogService::record(&mut *tx, &entry).await?;

        Self::commit(tx).await?;

        tracing::info!("Issue {} withdrawn by {}", id, user_id);

        Ok(())
    }

    /// Authority update: applies the allow-listed fields, records an audit
    /// entry and notifies the reporter when the status changed.
    pub async fn authority_update(
        &self,
        id: Uuid,
        actor_id: &str,
        update: &AuthorityUpdate,
    ) -> Result<Issue> {
        let mut tx = self.begin().await?;
        let current = Self::lock(&mut tx, id).await?;
        let next = update.apply(&current, Utc::now())?;

        let sql = format!(
            r#"
            UPDATE issues
            SET status = $2,
                priority = $3,
                department_id = $4,
                assigned_staff_id = $5,
                estimated_cost = $6,
                actual_cost = $7,
                progress_notes = $8,
                rejection_reason = $9,
                resolved_at = $10,
                updated_at = $11
            WHERE id = $1
            RETURNING {}
            "#,
            Issue::COLUMNS
        );

        let issue = sqlx::query_as::<_, Issue>(&sql)
            .bind(id)
            .bind(next.status)
            .bind(next.priority)
            .bind(next.department_id)
            .bind(next.assigned_staff_id)
            .bind(next.estimated_cost)
            .bind(next.actual_cost)
            .bind(&next.progress_notes)
            .bind(&next.rejection_reason)
            .bind(next.resolved_at)
            .bind(next.updated_at)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| {
                tracing::error!("Failed to apply authority update to {}: {:?}", id, e);
                AppError::from_write(e)
            })?;

        let entry = CreateAuditLog::for_issue(
            actor_id,
            id,
            AuditAction::IssueUpdated,
            json!({
                "fields": update.changed_fields(),
                "from_status": current.status,
                "to_status": issue.status,
            }),
        );
        AuditLogService::record(&mut *tx, &entry).await?;

        if update.changes_status(&current) {
            NotificationService::create(&mut *tx, &CreateNotification::status_changed(&issue))
                .await?;
        }

        Self::commit(tx).await?;

        tracing::info!(
            "Issue {} updated by {} ({} -> {})",
            id,
            actor_id,
            current.status,
            issue.status
        );

        Ok(issue)
    }
}
