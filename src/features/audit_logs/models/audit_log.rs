use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;
use sqlx::FromRow;
use uuid::Uuid;

/// Kind of change recorded in the audit trail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditAction {
    IssueUpdated,
    IssueWithdrawn,
    DepartmentCreated,
    StaffCreated,
}

impl AuditAction {
    pub fn as_str(self) -> &'static str {
        match self {
            AuditAction::IssueUpdated => "issue.updated",
            AuditAction::IssueWithdrawn => "issue.withdrawn",
            AuditAction::DepartmentCreated => "department.created",
            AuditAction::StaffCreated => "staff.created",
        }
    }
}

impl std::fmt::Display for AuditAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Database model for audit log entry
#[derive(Debug, Clone, FromRow)]
pub struct AuditLog {
    pub id: Uuid,
    pub actor_id: String,
    pub issue_id: Option<Uuid>,
    pub action: String,
    pub details: JsonValue,
    pub created_at: DateTime<Utc>,
}

/// Data for a new audit entry
#[derive(Debug, Clone)]
pub struct CreateAuditLog {
    pub actor_id: String,
    pub issue_id: Option<Uuid>,
    pub action: AuditAction,
    pub details: JsonValue,
}

impl CreateAuditLog {
    pub fn for_issue(actor_id: &str, issue_id: Uuid, action: AuditAction, details: JsonValue) -> Self {
        Self {
            actor_id: actor_id.to_string(),
            issue_id: Some(issue_id),
            action,
            details,
        }
    }
}
