use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::departments::models::{CreateStaff, Staff};
use crate::shared::validation::{validate_not_blank, validate_phone};

/// Request DTO for adding a staff member
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateStaffDto {
    pub department_id: Uuid,

    #[validate(
        length(min = 2, max = 120, message = "Name must be 2-120 characters"),
        custom(function = "validate_not_blank", message = "Name must not be blank")
    )]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    #[validate(custom(function = "validate_phone", message = "Invalid phone number"))]
    pub phone: Option<String>,

    #[validate(length(max = 80, message = "Role must not exceed 80 characters"))]
    pub role: Option<String>,
}

impl From<CreateStaffDto> for CreateStaff {
    fn from(dto: CreateStaffDto) -> Self {
        Self {
            department_id: dto.department_id,
            name: dto.name.trim().to_string(),
            email: dto.email,
            phone: dto.phone,
            role: dto.role,
        }
    }
}

/// Filters for the staff list
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct StaffListQuery {
    pub department_id: Option<Uuid>,
    /// Include inactive staff (default false)
    #[serde(default)]
    pub include_inactive: bool,
}

/// Response DTO for staff member
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StaffResponseDto {
    pub id: Uuid,
    pub department_id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub role: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Staff> for StaffResponseDto {
    fn from(s: Staff) -> Self {
        Self {
            id: s.id,
            department_id: s.department_id,
            name: s.name,
            email: s.email,
            phone: s.phone,
            role: s.role,
            is_active: s.is_active,
            created_at: s.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::faker::internet::en::SafeEmail;
    use fake::faker::name::en::Name;
    use fake::Fake;

    fn dto(phone: Option<&str>) -> CreateStaffDto {
        CreateStaffDto {
            department_id: Uuid::new_v4(),
            name: Name().fake(),
            email: Some(SafeEmail().fake()),
            phone: phone.map(str::to_string),
            role: Some("Field engineer".to_string()),
        }
    }

    #[test]
    fn test_staff_phone_validation() {
        assert!(dto(Some("+91 98765 43210")).validate().is_ok());
        assert!(dto(None).validate().is_ok());
        assert!(dto(Some("call me")).validate().is_err());
    }
}
