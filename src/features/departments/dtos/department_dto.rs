use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::departments::models::{CreateDepartment, Department};
use crate::shared::validation::validate_not_blank;

/// Request DTO for creating a department
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateDepartmentDto {
    #[validate(
        length(min = 2, max = 120, message = "Name must be 2-120 characters"),
        custom(function = "validate_not_blank", message = "Name must not be blank")
    )]
    pub name: String,

    #[validate(length(max = 1000, message = "Description must not exceed 1000 characters"))]
    pub description: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub contact_email: Option<String>,
}

impl From<CreateDepartmentDto> for CreateDepartment {
    fn from(dto: CreateDepartmentDto) -> Self {
        Self {
            name: dto.name.trim().to_string(),
            description: dto.description,
            contact_email: dto.contact_email,
        }
    }
}

/// Response DTO for department
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DepartmentResponseDto {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub contact_email: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Department> for DepartmentResponseDto {
    fn from(d: Department) -> Self {
        Self {
            id: d.id,
            name: d.name,
            description: d.description,
            contact_email: d.contact_email,
            created_at: d.created_at,
        }
    }
}
