use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::features::issues::models::{Issue, IssueStatus};

/// Database model for notification
#[derive(Debug, Clone, FromRow)]
pub struct Notification {
    pub id: Uuid,
    pub user_id: String,
    pub issue_id: Option<Uuid>,
    pub title: String,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

/// Data for creating a notification
#[derive(Debug, Clone)]
pub struct CreateNotification {
    pub user_id: String,
    pub issue_id: Option<Uuid>,
    pub title: String,
    pub message: String,
}

impl CreateNotification {
    /// Tell the reporter their issue moved to a new status
    pub fn status_changed(issue: &Issue) -> Self {
        let mut message = format!(
            "Your report \"{}\" is now {}.",
            issue.title,
            issue.status.label()
        );
        if issue.status == IssueStatus::Rejected {
            if let Some(reason) = issue.rejection_reason.as_deref() {
                message.push_str(&format!(" Reason: {}", reason));
            }
        }

        Self {
            user_id: issue.user_id.clone(),
            issue_id: Some(issue.id),
            title: "Issue status updated".to_string(),
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::issues::models::fixtures::issue;

    #[test]
    fn test_status_changed_targets_reporter() {
        let issue = Issue {
            status: IssueStatus::InProgress,
            ..issue("Overflowing garbage bin")
        };
        let n = CreateNotification::status_changed(&issue);

        assert_eq!(n.user_id, issue.user_id);
        assert_eq!(n.issue_id, Some(issue.id));
        assert_eq!(
            n.message,
            "Your report \"Overflowing garbage bin\" is now In Progress."
        );
    }

    #[test]
    fn test_rejection_reason_is_included() {
        let issue = Issue {
            status: IssueStatus::Rejected,
            rejection_reason: Some("Private property".to_string()),
            ..issue("Overflowing garbage bin")
        };
        let n = CreateNotification::status_changed(&issue);
        assert!(n.message.ends_with("Reason: Private property"));
    }
}
