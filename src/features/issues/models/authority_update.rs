use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::issues::models::{Issue, IssuePriority, IssueStatus};

/// Fields an authority may change on an issue. Absent fields are left as-is.
#[derive(Debug, Clone, Default)]
pub struct AuthorityUpdate {
    pub status: Option<IssueStatus>,
    pub priority: Option<IssuePriority>,
    pub department_id: Option<Uuid>,
    pub assigned_staff_id: Option<Uuid>,
    pub estimated_cost: Option<Decimal>,
    pub actual_cost: Option<Decimal>,
    pub progress_notes: Option<String>,
    pub rejection_reason: Option<String>,
}

impl AuthorityUpdate {
    pub fn is_empty(&self) -> bool {
        self.changed_fields().is_empty()
    }

    /// Merge onto `current`, producing the row to be written.
    ///
    /// `resolved_at` is stamped on the transition into `resolved` and cleared
    /// when an issue is reopened.
    pub fn apply(&self, current: &Issue, now: DateTime<Utc>) -> Result<Issue> {
        if self.is_empty() {
            return Err(AppError::BadRequest("No fields to update".to_string()));
        }

        for cost in [self.estimated_cost, self.actual_cost].into_iter().flatten() {
            if cost.is_sign_negative() {
                return Err(AppError::Validation("Costs cannot be negative".to_string()));
            }
        }

        let mut next = current.clone();
        if let Some(status) = self.status {
            next.status = status;
        }
        if let Some(priority) = self.priority {
            next.priority = priority;
        }
        if let Some(department_id) = self.department_id {
            next.department_id = Some(department_id);
        }
        if let Some(staff_id) = self.assigned_staff_id {
            next.assigned_staff_id = Some(staff_id);
        }
        if let Some(cost) = self.estimated_cost {
            next.estimated_cost = Some(cost);
        }
        if let Some(cost) = self.actual_cost {
            next.actual_cost = Some(cost);
        }
        if let Some(notes) = &self.progress_notes {
            next.progress_notes = Some(notes.clone());
        }
        if let Some(reason) = &self.rejection_reason {
            next.rejection_reason = Some(reason.trim().to_string()).filter(|r| !r.is_empty());
        }

        if next.status == IssueStatus::Rejected
            && next.rejection_reason.as_deref().is_none_or(str::is_empty)
        {
            return Err(AppError::Validation(
                "A rejection reason is required to reject an issue".to_string(),
            ));
        }

        next.resolved_at = match (current.status, next.status) {
            (IssueStatus::Resolved, IssueStatus::Resolved) => current.resolved_at,
            (_, IssueStatus::Resolved) => Some(now),
            _ => None,
        };
        next.updated_at = now;

        Ok(next)
    }

    /// Names of the fields present in this update, for the audit trail
    pub fn changed_fields(&self) -> Vec<&'static str> {
        [
            ("status", self.status.is_some()),
            ("priority", self.priority.is_some()),
            ("department_id", self.department_id.is_some()),
            ("assigned_staff_id", self.assigned_staff_id.is_some()),
            ("estimated_cost", self.estimated_cost.is_some()),
            ("actual_cost", self.actual_cost.is_some()),
            ("progress_notes", self.progress_notes.is_some()),
            ("rejection_reason", self.rejection_reason.is_some()),
        ]
        .into_iter()
        .filter_map(|(name, present)| present.then_some(name))
        .collect()
    }

    /// True when `apply` moved the issue to another status
    pub fn changes_status(&self, current: &Issue) -> bool {
        self.status.is_some_and(|s| s != current.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::issues::models::fixtures::issue;
    use rust_decimal::Decimal;

    #[test]
    fn test_empty_update_is_rejected() {
        let err = AuthorityUpdate::default()
            .apply(&issue("Broken drain cover"), Utc::now())
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn test_only_supplied_fields_change() {
        let current = issue("Broken drain cover");
        let update = AuthorityUpdate {
            progress_notes: Some("Crew dispatched".to_string()),
            estimated_cost: Some(Decimal::new(150050, 2)),
            ..Default::default()
        };

        let next = update.apply(&current, Utc::now()).unwrap();
        assert_eq!(next.status, current.status);
        assert_eq!(next.priority, current.priority);
        assert_eq!(next.progress_notes.as_deref(), Some("Crew dispatched"));
        assert_eq!(next.estimated_cost, Some(Decimal::new(150050, 2)));
        assert_eq!(next.title, current.title);
        assert_eq!(update.changed_fields(), vec!["estimated_cost", "progress_notes"]);
    }

    #[test]
    fn test_reject_requires_reason() {
        let update = AuthorityUpdate {
            status: Some(IssueStatus::Rejected),
            ..Default::default()
        };
        let err = update
            .apply(&issue("Broken drain cover"), Utc::now())
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let blank = AuthorityUpdate {
            status: Some(IssueStatus::Rejected),
            rejection_reason: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(blank.apply(&issue("Broken drain cover"), Utc::now()).is_err());
    }

    #[test]
    fn test_reject_with_reason() {
        let update = AuthorityUpdate {
            status: Some(IssueStatus::Rejected),
            rejection_reason: Some("Duplicate of an existing report".to_string()),
            ..Default::default()
        };
        let next = update
            .apply(&issue("Broken drain cover"), Utc::now())
            .unwrap();
        assert_eq!(next.status, IssueStatus::Rejected);
    }

    #[test]
    fn test_negative_cost_is_rejected() {
        let update = AuthorityUpdate {
            actual_cost: Some(Decimal::new(-1, 0)),
            ..Default::default()
        };
        assert!(update.apply(&issue("Broken drain cover"), Utc::now()).is_err());
    }

    #[test]
    fn test_resolved_at_tracks_resolution() {
        let now = Utc::now();
        let resolve = AuthorityUpdate {
            status: Some(IssueStatus::Resolved),
            ..Default::default()
        };
        let resolved = resolve.apply(&issue("Broken drain cover"), now).unwrap();
        assert_eq!(resolved.resolved_at, Some(now));

        let later = now + chrono::Duration::hours(1);
        let notes = AuthorityUpdate {
            progress_notes: Some("Verified on site".to_string()),
            ..Default::default()
        };
        assert_eq!(notes.apply(&resolved, later).unwrap().resolved_at, Some(now));

        let reopen = AuthorityUpdate {
            status: Some(IssueStatus::InProgress),
            ..Default::default()
        };
        assert_eq!(reopen.apply(&resolved, later).unwrap().resolved_at, None);
    }

    #[test]
    fn test_changes_status() {
        let current = issue("Broken drain cover");
        let same = AuthorityUpdate {
            status: Some(IssueStatus::Pending),
            ..Default::default()
        };
        let moved = AuthorityUpdate {
            status: Some(IssueStatus::InProgress),
            ..Default::default()
        };
        assert!(!same.changes_status(&current));
        assert!(moved.changes_status(&current));
    }
}
