use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::features::audit_logs::models::AuditLog;

/// Response DTO for audit log entry
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuditLogResponseDto {
    pub id: Uuid,
    pub actor_id: String,
    pub issue_id: Option<Uuid>,
    pub action: String,
    #[schema(value_type = Object)]
    pub details: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

impl From<AuditLog> for AuditLogResponseDto {
    fn from(log: AuditLog) -> Self {
        Self {
            id: log.id,
            actor_id: log.actor_id,
            issue_id: log.issue_id,
            action: log.action,
            details: log.details,
            created_at: log.created_at,
        }
    }
}

/// Optional filters for the audit log list
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct AuditLogQuery {
    /// Only entries about this issue
    pub issue_id: Option<Uuid>,
}
