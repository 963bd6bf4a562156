use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::issues::models::{IssueCategory, IssuePriority, IssueStatus};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StatusCountDto {
    pub status: IssueStatus,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryCountDto {
    pub category: IssueCategory,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PriorityCountDto {
    pub priority: IssuePriority,
    pub count: i64,
}

/// Headline numbers for the authority dashboard
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct IssueStatsDto {
    pub total_issues: i64,
    pub open_issues: i64,
    /// Sum of complaint counts, i.e. reports plus supports
    pub total_complaints: i64,
    pub resolved_last_30_days: i64,
    /// Mean hours from report to resolution, absent until something is resolved
    pub avg_resolution_hours: Option<f64>,
    pub by_status: Vec<StatusCountDto>,
    pub by_category: Vec<CategoryCountDto>,
    pub by_priority: Vec<PriorityCountDto>,
}
