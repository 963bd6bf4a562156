use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::features::issues::models::{
    AuthorityUpdate, CreateIssue, Issue, IssueCategory, IssueFilter, IssuePriority, IssueStatus,
    UpdateIssue,
};
use crate::features::issues::services::DuplicateDraft;
use crate::shared::validation::validate_not_blank;

/// Latitude and longitude must be supplied together
fn coordinates_paired(latitude: Option<f64>, longitude: Option<f64>) -> Result<(), ValidationError> {
    if latitude.is_some() == longitude.is_some() {
        Ok(())
    } else {
        let mut err = ValidationError::new("coordinates");
        err.message = Some("latitude and longitude must be provided together".into());
        Err(err)
    }
}

fn validate_create_coordinates(dto: &CreateIssueDto) -> Result<(), ValidationError> {
    coordinates_paired(dto.latitude, dto.longitude)
}

fn validate_draft_coordinates(dto: &DuplicateCheckDto) -> Result<(), ValidationError> {
    coordinates_paired(dto.latitude, dto.longitude)
}

/// Request DTO for reporting a new issue
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_create_coordinates"))]
pub struct CreateIssueDto {
    #[validate(
        length(min = 3, max = 200, message = "Title must be 3-200 characters"),
        custom(function = "validate_not_blank", message = "Title must not be blank")
    )]
    pub title: String,

    #[validate(length(max = 5000, message = "Description must not exceed 5000 characters"))]
    #[serde(default)]
    pub description: String,

    pub category: IssueCategory,

    /// Defaults to low; later supports recompute it from the complaint count
    pub priority: Option<IssuePriority>,

    #[validate(length(max = 500, message = "Address must not exceed 500 characters"))]
    #[serde(default)]
    pub address: String,

    #[validate(range(min = -90.0, max = 90.0, message = "Latitude must be between -90 and 90"))]
    pub latitude: Option<f64>,

    #[validate(range(min = -180.0, max = 180.0, message = "Longitude must be between -180 and 180"))]
    pub longitude: Option<f64>,

    #[validate(url(message = "Image URL must be a valid URL"))]
    pub image_url: Option<String>,

    #[validate(url(message = "Audio URL must be a valid URL"))]
    pub audio_url: Option<String>,
}

impl CreateIssueDto {
    pub fn into_create(self, user_id: &str) -> CreateIssue {
        CreateIssue {
            user_id: user_id.to_string(),
            title: self.title.trim().to_string(),
            description: self.description,
            category: self.category,
            priority: self.priority.unwrap_or(IssuePriority::Low),
            address: self.address,
            latitude: self.latitude,
            longitude: self.longitude,
            image_url: self.image_url,
            audio_url: self.audio_url,
        }
    }
}

/// Request DTO for the duplicate check run before submission
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_draft_coordinates"))]
pub struct DuplicateCheckDto {
    pub title: String,
    pub category: IssueCategory,
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: Option<f64>,
}

impl From<DuplicateCheckDto> for DuplicateDraft {
    fn from(dto: DuplicateCheckDto) -> Self {
        Self {
            title: dto.title,
            category: dto.category,
            coordinates: dto.latitude.zip(dto.longitude),
        }
    }
}

/// Duplicate check result
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DuplicateCheckResponseDto {
    /// False when the title was too short to check
    pub checked: bool,
    pub candidates: Vec<IssueResponseDto>,
}

/// Request DTO for a reporter editing a pending issue
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdateIssueDto {
    #[validate(
        length(min = 3, max = 200, message = "Title must be 3-200 characters"),
        custom(function = "validate_not_blank", message = "Title must not be blank")
    )]
    pub title: Option<String>,

    #[validate(length(max = 5000, message = "Description must not exceed 5000 characters"))]
    pub description: Option<String>,

    pub category: Option<IssueCategory>,
}

impl From<UpdateIssueDto> for UpdateIssue {
    fn from(dto: UpdateIssueDto) -> Self {
        Self {
            title: dto.title.map(|t| t.trim().to_string()),
            description: dto.description,
            category: dto.category,
        }
    }
}

/// Request DTO for an authority update.
///
/// Only these fields can be changed; anything else in the body is rejected.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct AuthorityUpdateIssueDto {
    pub status: Option<IssueStatus>,
    pub priority: Option<IssuePriority>,
    pub department_id: Option<Uuid>,
    pub assigned_staff_id: Option<Uuid>,
    #[schema(value_type = Option<String>, example = "12500.00")]
    pub estimated_cost: Option<Decimal>,
    #[schema(value_type = Option<String>, example = "11800.50")]
    pub actual_cost: Option<Decimal>,
    #[validate(length(max = 5000, message = "Progress notes must not exceed 5000 characters"))]
    pub progress_notes: Option<String>,
    #[validate(length(max = 1000, message = "Rejection reason must not exceed 1000 characters"))]
    pub rejection_reason: Option<String>,
}

impl From<AuthorityUpdateIssueDto> for AuthorityUpdate {
    fn from(dto: AuthorityUpdateIssueDto) -> Self {
        Self {
            status: dto.status,
            priority: dto.priority,
            department_id: dto.department_id,
            assigned_staff_id: dto.assigned_staff_id,
            estimated_cost: dto.estimated_cost,
            actual_cost: dto.actual_cost,
            progress_notes: dto.progress_notes,
            rejection_reason: dto.rejection_reason,
        }
    }
}

/// Filters for the authority issue list
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct IssueListQuery {
    pub status: Option<IssueStatus>,
    pub category: Option<IssueCategory>,
    pub priority: Option<IssuePriority>,
    pub department_id: Option<Uuid>,
}

impl From<IssueListQuery> for IssueFilter {
    fn from(q: IssueListQuery) -> Self {
        Self {
            status: q.status,
            category: q.category,
            priority: q.priority,
            department_id: q.department_id,
        }
    }
}

/// Response DTO for issue
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct IssueResponseDto {
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
    #[schema(value_type = Option<String>)]
    pub estimated_cost: Option<Decimal>,
    #[schema(value_type = Option<String>)]
    pub actual_cost: Option<Decimal>,
    pub progress_notes: Option<String>,
    pub rejection_reason: Option<String>,
    pub resolved_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Issue> for IssueResponseDto {
    fn from(i: Issue) -> Self {
        Self {
            id: i.id,
            user_id: i.user_id,
            title: i.title,
            description: i.description,
            category: i.category,
            status: i.status,
            priority: i.priority,
            address: i.address,
            latitude: i.latitude,
            longitude: i.longitude,
            image_url: i.image_url,
            audio_url: i.audio_url,
            complaint_count: i.complaint_count,
            department_id: i.department_id,
            assigned_staff_id: i.assigned_staff_id,
            estimated_cost: i.estimated_cost,
            actual_cost: i.actual_cost,
            progress_notes: i.progress_notes,
            rejection_reason: i.rejection_reason,
            resolved_at: i.resolved_at,
            created_at: i.created_at,
            updated_at: i.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn create_dto(body: serde_json::Value) -> CreateIssueDto {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_create_dto_defaults() {
        let dto = create_dto(json!({ "title": "  Streetlight out  ", "category": "streetlight" }));
        assert!(dto.validate().is_ok());

        let create = dto.into_create("user-1");
        assert_eq!(create.title, "Streetlight out");
        assert_eq!(create.priority, IssuePriority::Low);
        assert_eq!(create.description, "");
    }

    #[test]
    fn test_create_dto_requires_paired_coordinates() {
        let dto = create_dto(json!({
            "title": "Streetlight out",
            "category": "streetlight",
            "latitude": 12.97
        }));
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_create_dto_rejects_out_of_range_latitude() {
        let dto = create_dto(json!({
            "title": "Streetlight out",
            "category": "streetlight",
            "latitude": 120.0,
            "longitude": 77.59
        }));
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_create_dto_rejects_blank_title() {
        let dto = create_dto(json!({ "title": "      ", "category": "other" }));
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_unknown_category_fails_to_parse() {
        let result = serde_json::from_value::<CreateIssueDto>(
            json!({ "title": "Streetlight out", "category": "volcano" }),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_citizen_update_cannot_touch_status() {
        let result = serde_json::from_value::<UpdateIssueDto>(json!({ "status": "resolved" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_authority_update_rejects_unknown_fields() {
        let result = serde_json::from_value::<AuthorityUpdateIssueDto>(
            json!({ "status": "in_progress", "user_id": "someone-else" }),
        );
        assert!(result.is_err());

        let ok = serde_json::from_value::<AuthorityUpdateIssueDto>(
            json!({ "status": "in_progress", "estimated_cost": "1200.50" }),
        )
        .unwrap();
        assert_eq!(ok.estimated_cost, Some(Decimal::new(120050, 2)));
    }

    #[test]
    fn test_duplicate_draft_keeps_coordinates() {
        let dto: DuplicateCheckDto = serde_json::from_value(json!({
            "title": "Large pothole on Main Street",
            "category": "pothole",
            "latitude": 40.7128,
            "longitude": -74.0060
        }))
        .unwrap();
        let draft = DuplicateDraft::from(dto);
        assert_eq!(draft.coordinates, Some((40.7128, -74.0060)));
    }
}
