use std::collections::HashMap;
use std::hash::Hash;

use sqlx::{FromRow, PgPool};

use crate::core::error::{AppError, Result};
use crate::features::admin::dtos::*;
use crate::features::issues::models::{IssueCategory, IssuePriority, IssueStatus};

#[derive(Debug, FromRow)]
struct StatsTotalsRow {
    total_issues: i64,
    open_issues: i64,
    total_complaints: i64,
    resolved_last_30_days: i64,
    avg_resolution_hours: Option<f64>,
}

/// One entry per variant in `all`, zero where the query returned nothing
fn fill_counts<K>(all: &[K], rows: Vec<(K, i64)>) -> Vec<(K, i64)>
where
    K: Copy + Eq + Hash,
{
    let counts: HashMap<K, i64> = rows.into_iter().collect();
    all.iter()
        .map(|k| (*k, counts.get(k).copied().unwrap_or(0)))
        .collect()
}

/// Service for authority dashboard queries
pub struct AdminService {
    pool: PgPool,
}

impl AdminService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn grouped_counts<K>(&self, column: &str) -> Result<Vec<(K, i64)>>
    where
        K: for<'r> sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres> + Send + Unpin,
    {
        let sql = format!(
            "SELECT {column}, COUNT(*) FROM issues GROUP BY {column}",
            column = column
        );

        sqlx::query_as::<_, (K, i64)>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to count issues by {}: {:?}", column, e);
                AppError::Database(e)
            })
    }

    /// Counts by status, category and priority plus resolution metrics
    pub async fn get_stats(&self) -> Result<IssueStatsDto> {
        let totals = sqlx::query_as::<_, StatsTotalsRow>(
            r#"
            SELECT
                COUNT(*) AS total_issues,
                COUNT(*) FILTER (WHERE status NOT IN ('resolved', 'rejected')) AS open_issues,
                COALESCE(SUM(complaint_count), 0)::BIGINT AS total_complaints,
                COUNT(*) FILTER (WHERE resolved_at >= NOW() - INTERVAL '30 days') AS resolved_last_30_days,
                (AVG(EXTRACT(EPOCH FROM (resolved_at - created_at)))
                    FILTER (WHERE resolved_at IS NOT NULL) / 3600.0)::FLOAT8 AS avg_resolution_hours
            FROM issues
            "#,
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get issue totals: {:?}", e);
            AppError::Database(e)
        })?;

        let by_status = fill_counts(&IssueStatus::ALL, self.grouped_counts("status").await?)
            .into_iter()
            .map(|(status, count)| StatusCountDto { status, count })
            .collect();
        let by_category =
            fill_counts(&IssueCategory::ALL, self.grouped_counts("category").await?)
                .into_iter()
                .map(|(category, count)| CategoryCountDto { category, count })
                .collect();
        let by_priority =
            fill_counts(&IssuePriority::ALL, self.grouped_counts("priority").await?)
                .into_iter()
                .map(|(priority, count)| PriorityCountDto { priority, count })
                .collect();

        Ok(IssueStatsDto {
            total_issues: totals.total_issues,
            open_issues: totals.open_issues,
            total_complaints: totals.total_complaints,
            resolved_last_30_days: totals.resolved_last_30_days,
            avg_resolution_hours: totals.avg_resolution_hours,
            by_status,
            by_category,
            by_priority,
        })
    }
}
