use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::core::error::{AppError, Result};

/// Issue category enum matching database enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "issue_category", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum IssueCategory {
    Pothole,
    Streetlight,
    Garbage,
    Drainage,
    Road,
    Water,
    Other,
}

impl IssueCategory {
    pub const ALL: [IssueCategory; 7] = [
        IssueCategory::Pothole,
        IssueCategory::Streetlight,
        IssueCategory::Garbage,
        IssueCategory::Drainage,
        IssueCategory::Road,
        IssueCategory::Water,
        IssueCategory::Other,
    ];
}

impl std::fmt::Display for IssueCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IssueCategory::Pothole => write!(f, "pothole"),
            IssueCategory::Streetlight => write!(f, "streetlight"),
            IssueCategory::Garbage => write!(f, "garbage"),
            IssueCategory::Drainage => write!(f, "drainage"),
            IssueCategory::Road => write!(f, "road"),
            IssueCategory::Water => write!(f, "water"),
            IssueCategory::Other => write!(f, "other"),
        }
    }
}

/// Issue status enum matching database enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "issue_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum IssueStatus {
    Pending,
    NotStarted,
    InProgress,
    Resolved,
    Rejected,
}

impl IssueStatus {
    pub const ALL: [IssueStatus; 5] = [
        IssueStatus::Pending,
        IssueStatus::NotStarted,
        IssueStatus::InProgress,
        IssueStatus::Resolved,
        IssueStatus::Rejected,
    ];

    /// Resolved and rejected are terminal, everything else is still open
    pub fn is_open(self) -> bool {
        !matches!(self, IssueStatus::Resolved | IssueStatus::Rejected)
    }

    /// Human readable label used in notifications
    pub fn label(self) -> &'static str {
        match self {
            IssueStatus::Pending => "Pending",
            IssueStatus::NotStarted => "Not Started",
            IssueStatus::InProgress => "In Progress",
            IssueStatus::Resolved => "Resolved",
            IssueStatus::Rejected => "Rejected",
        }
    }
}

impl std::fmt::Display for IssueStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IssueStatus::Pending => write!(f, "pending"),
            IssueStatus::NotStarted => write!(f, "not_started"),
            IssueStatus::InProgress => write!(f, "in_progress"),
            IssueStatus::Resolved => write!(f, "resolved"),
            IssueStatus::Rejected => write!(f, "rejected"),
        }
    }
}

/// Issue priority enum matching database enum
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Type, ToSchema,
)]
#[sqlx(type_name = "issue_priority", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum IssuePriority {
    Low,
    Medium,
    High,
    Critical,
}

impl IssuePriority {
    pub const ALL: [IssuePriority; 4] = [
        IssuePriority::Low,
        IssuePriority::Medium,
        IssuePriority::High,
        IssuePriority::Critical,
    ];
    pub const HIGH_THRESHOLD: i32 = 10;
    pub const MEDIUM_THRESHOLD: i32 = 5;

    /// Priority derived from how many citizens reported the same problem
    pub fn from_complaint_count(count: i32) -> Self {
        if count >= Self::HIGH_THRESHOLD {
            IssuePriority::High
        } else if count >= Self::MEDIUM_THRESHOLD {
            IssuePriority::Medium
        } else {
            IssuePriority::Low
        }
    }
}

impl std::fmt::Display for IssuePriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IssuePriority::Low => write!(f, "low"),
            IssuePriority::Medium => write!(f, "medium"),
            IssuePriority::High => write!(f, "high"),
            IssuePriority::Critical => write!(f, "critical"),
        }
    }
}

/// Database model for issue
#[derive(Debug, Clone, FromRow)]
pub struct Issue {
    pub id: Uuid,
    pub user_id: String,
    pub title: String,
    pub description: String,
    pub category: IssueCategory,
    pub status: IssueStatus,
    pub priority: IssuePriority,
    pub address: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub image_url: Option<String>,
    pub audio_url: Option<String>,
    pub complaint_count: i32,
    pub department_id: Option<Uuid>,
    pub assigned_staff_id: Option<Uuid>,
    pub estimated_cost: Option<Decimal>,
    pub actual_cost: Option<Decimal>,
    pub progress_notes: Option<String>,
    pub rejection_reason: Option<String>,
    pub resolved_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Issue {
    /// Column list shared by every query returning an `Issue`
    pub const COLUMNS: &'static str = "id, user_id, title, description, category, status, \
        priority, address, latitude, longitude, image_url, audio_url, complaint_count, \
        department_id, assigned_staff_id, estimated_cost, actual_cost, progress_notes, \
        rejection_reason, resolved_at, created_at, updated_at";

    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.latitude.zip(self.longitude)
    }

    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.user_id == user_id
    }

    /// Owner check for withdrawal and feedback
    pub fn ensure_owner(&self, user_id: &str) -> Result<()> {
        if self.is_owned_by(user_id) {
            Ok(())
        } else {
            Err(AppError::Forbidden(
                "Only the reporter can modify this issue".to_string(),
            ))
        }
    }

    /// New complaint count and priority after one more citizen supports this issue
    pub fn support_outcome(&self) -> Result<(i32, IssuePriority)> {
        if !self.status.is_open() {
            return Err(AppError::Conflict(format!(
                "Issue is already {} and cannot be supported",
                self.status
            )));
        }
        let count = self.complaint_count + 1;
        Ok((count, IssuePriority::from_complaint_count(count)))
    }

    /// A citizen may only edit their own issue while it is still pending
    pub fn ensure_citizen_editable(&self, user_id: &str) -> Result<()> {
        self.ensure_owner(user_id)?;
        if self.status != IssueStatus::Pending {
            return Err(AppError::Conflict(format!(
                "Issue can no longer be edited (status: {})",
                self.status
            )));
        }
        Ok(())
    }
}

/// Data for creating a new issue
#[derive(Debug, Clone)]
pub struct CreateIssue {
    pub user_id: String,
    pub title: String,
    pub description: String,
    pub category: IssueCategory,
    pub priority: IssuePriority,
    pub address: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub image_url: Option<String>,
    pub audio_url: Option<String>,
}

/// Citizen edit of a pending issue
#[derive(Debug, Clone, Default)]
pub struct UpdateIssue {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<IssueCategory>,
}

/// Filters for the authority issue list
#[derive(Debug, Clone, Default)]
pub struct IssueFilter {
    pub status: Option<IssueStatus>,
    pub category: Option<IssueCategory>,
    pub priority: Option<IssuePriority>,
    pub department_id: Option<Uuid>,
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use fake::faker::lorem::en::Sentence;
    use fake::Fake;

    /// Open pothole issue with a fixed title and no coordinates
    pub fn issue(title: &str) -> Issue {
        let now = Utc::now();
        Issue {
            id: Uuid::new_v4(),
            user_id: "reporter-1".to_string(),
            title: title.to_string(),
            description: Sentence(3..8).fake(),
            category: IssueCategory::Pothole,
            status: IssueStatus::Pending,
            priority: IssuePriority::Low,
            address: "Main Street".to_string(),
            latitude: None,
            longitude: None,
            image_url: None,
            audio_url: None,
            complaint_count: 1,
            department_id: None,
            assigned_staff_id: None,
            estimated_cost: None,
            actual_cost: None,
            progress_notes: None,
            rejection_reason: None,
            resolved_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn issue_at(title: &str, lat: f64, lng: f64) -> Issue {
        Issue {
            latitude: Some(lat),
            longitude: Some(lng),
            ..issue(title)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::issue;
    use super::*;

    #[test]
    fn test_priority_thresholds() {
        assert_eq!(IssuePriority::from_complaint_count(1), IssuePriority::Low);
        assert_eq!(IssuePriority::from_complaint_count(4), IssuePriority::Low);
        assert_eq!(IssuePriority::from_complaint_count(5), IssuePriority::Medium);
        assert_eq!(IssuePriority::from_complaint_count(9), IssuePriority::Medium);
        assert_eq!(IssuePriority::from_complaint_count(10), IssuePriority::High);
        assert_eq!(IssuePriority::from_complaint_count(250), IssuePriority::High);
    }

    #[test]
    fn test_open_statuses() {
        assert!(IssueStatus::Pending.is_open());
        assert!(IssueStatus::NotStarted.is_open());
        assert!(IssueStatus::InProgress.is_open());
        assert!(!IssueStatus::Resolved.is_open());
        assert!(!IssueStatus::Rejected.is_open());
    }

    #[test]
    fn test_enum_wire_names() {
        assert_eq!(
            serde_json::to_value(IssueStatus::InProgress).unwrap(),
            "in_progress"
        );
        assert_eq!(IssueStatus::NotStarted.to_string(), "not_started");
        assert_eq!(
            serde_json::from_str::<IssueCategory>("\"streetlight\"").unwrap(),
            IssueCategory::Streetlight
        );
    }

    #[test]
    fn test_pending_issue_is_editable_by_owner() {
        let issue = issue("Broken streetlight near park");
        assert!(issue.ensure_citizen_editable("reporter-1").is_ok());
    }

    #[test]
    fn test_edit_by_other_user_is_forbidden() {
        let issue = issue("Broken streetlight near park");
        let err = issue.ensure_citizen_editable("someone-else").unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[test]
    fn test_edit_refused_once_issue_left_pending() {
        for status in [
            IssueStatus::NotStarted,
            IssueStatus::InProgress,
            IssueStatus::Resolved,
            IssueStatus::Rejected,
        ] {
            let issue = Issue {
                status,
                ..issue("Broken streetlight near park")
            };
            let err = issue.ensure_citizen_editable("reporter-1").unwrap_err();
            assert!(matches!(err, AppError::Conflict(_)), "status {status}");
        }
    }

    #[test]
    fn test_support_recomputes_priority() {
        let four = Issue {
            complaint_count: 4,
            ..issue("Large pothole on Main Street")
        };
        assert_eq!(four.support_outcome().unwrap(), (5, IssuePriority::Medium));

        let nine = Issue {
            complaint_count: 9,
            priority: IssuePriority::Medium,
            ..issue("Large pothole on Main Street")
        };
        assert_eq!(nine.support_outcome().unwrap(), (10, IssuePriority::High));

        let first = issue("Large pothole on Main Street");
        assert_eq!(first.support_outcome().unwrap(), (2, IssuePriority::Low));
    }

    #[test]
    fn test_closed_issue_cannot_be_supported() {
        let resolved = Issue {
            status: IssueStatus::Resolved,
            ..issue("Large pothole on Main Street")
        };
        assert!(matches!(
            resolved.support_outcome().unwrap_err(),
            AppError::Conflict(_)
        ));
    }

    #[test]
    fn test_coordinates_require_both_parts() {
        let mut issue = issue("Broken streetlight near park");
        issue.latitude = Some(12.0);
        assert_eq!(issue.coordinates(), None);
        issue.longitude = Some(77.0);
        assert_eq!(issue.coordinates(), Some((12.0, 77.0)));
    }
}
