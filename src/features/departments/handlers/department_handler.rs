use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::core::error::Result;
use crate::core::extractor::{AppJson, AppQuery};
use crate::features::auth::guards::{RequireAdmin, RequireAuthority};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::departments::dtos::{
    CreateDepartmentDto, CreateStaffDto, DepartmentResponseDto, StaffListQuery, StaffResponseDto,
};
use crate::features::departments::services::{DepartmentService, StaffService};
use crate::shared::types::{ApiResponse, Meta};

/// State for department and staff handlers
#[derive(Clone)]
pub struct DepartmentState {
    pub department_service: Arc<DepartmentService>,
    pub staff_service: Arc<StaffService>,
}

async fn department_list(
    state: &DepartmentState,
) -> Result<Json<ApiResponse<Vec<DepartmentResponseDto>>>> {
    let departments = state.department_service.list().await?;
    let total = departments.len() as i64;
    let dtos: Vec<DepartmentResponseDto> = departments.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::success(
        Some(dtos),
        None,
        Some(Meta::total(total)),
    )))
}

/// Department directory for any signed-in user
#[utoipa::path(
    get,
    path = "/api/departments",
    responses(
        (status = 200, description = "Departments", body = ApiResponse<Vec<DepartmentResponseDto>>),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "departments"
)]
pub async fn list_departments(
    _user: AuthenticatedUser,
    State(state): State<DepartmentState>,
) -> Result<Json<ApiResponse<Vec<DepartmentResponseDto>>>> {
    department_list(&state).await
}

/// List departments (authority portal)
#[utoipa::path(
    get,
    path = "/api/admin/departments",
    responses(
        (status = 200, description = "Departments", body = ApiResponse<Vec<DepartmentResponseDto>>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Authority access required")
    ),
    security(("bearer_auth" = [])),
    tag = "admin"
)]
pub async fn admin_list_departments(
    RequireAuthority(_user): RequireAuthority,
    State(state): State<DepartmentState>,
) -> Result<Json<ApiResponse<Vec<DepartmentResponseDto>>>> {
    department_list(&state).await
}

/// Create a department (admin only)
#[utoipa::path(
    post,
    path = "/api/admin/departments",
    request_body = CreateDepartmentDto,
    responses(
        (status = 201, description = "Department created", body = ApiResponse<DepartmentResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin access required"),
        (status = 409, description = "Name already taken")
    ),
    security(("bearer_auth" = [])),
    tag = "admin"
)]
pub async fn create_department(
    RequireAdmin(user): RequireAdmin,
    State(state): State<DepartmentState>,
    AppJson(dto): AppJson<CreateDepartmentDto>,
) -> Result<(StatusCode, Json<ApiResponse<DepartmentResponseDto>>)> {
    dto.validate()?;

    let department = state
        .department_service
        .create(&dto.into(), &user.sub)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(department.into()), None, None)),
    ))
}

/// List staff (authority portal)
#[utoipa::path(
    get,
    path = "/api/admin/staff",
    params(StaffListQuery),
    responses(
        (status = 200, description = "Staff members", body = ApiResponse<Vec<StaffResponseDto>>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Authority access required")
    ),
    security(("bearer_auth" = [])),
    tag = "admin"
)]
pub async fn list_staff(
    RequireAuthority(_user): RequireAuthority,
    State(state): State<DepartmentState>,
    AppQuery(query): AppQuery<StaffListQuery>,
) -> Result<Json<ApiResponse<Vec<StaffResponseDto>>>> {
    let staff = state.staff_service.list(&query).await?;
    let total = staff.len() as i64;
    let dtos: Vec<StaffResponseDto> = staff.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::success(
        Some(dtos),
        None,
        Some(Meta::total(total)),
    )))
}

/// Add a staff member (admin only)
#[utoipa::path(
    post,
    path = "/api/admin/staff",
    request_body = CreateStaffDto,
    responses(
        (status = 201, description = "Staff member added", body = ApiResponse<StaffResponseDto>),
        (status = 400, description = "Validation error or unknown department"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin access required")
    ),
    security(("bearer_auth" = [])),
    tag = "admin"
)]
pub async fn create_staff(
    RequireAdmin(user): RequireAdmin,
    State(state): State<DepartmentState>,
    AppJson(dto): AppJson<CreateStaffDto>,
) -> Result<(StatusCode, Json<ApiResponse<StaffResponseDto>>)> {
    dto.validate()?;

    let staff = state.staff_service.create(&dto.into(), &user.sub).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(staff.into()), None, None)),
    ))
}
