use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::Result;
use crate::core::extractor::{AppJson, AppQuery};
use crate::features::admin::dtos::*;
use crate::features::admin::services::AdminService;
use crate::features::auth::guards::RequireAuthority;
use crate::features::issues::dtos::{AuthorityUpdateIssueDto, IssueListQuery, IssueResponseDto};
use crate::features::issues::services::IssueService;
use crate::shared::types::{ApiResponse, Meta, PaginationQuery};

/// State for authority portal handlers
#[derive(Clone)]
pub struct AdminState {
    pub admin_service: Arc<AdminService>,
    pub issue_service: Arc<IssueService>,
}

/// List issues with filters (paginated)
#[utoipa::path(
    get,
    path = "/api/admin/issues",
    params(IssueListQuery, PaginationQuery),
    responses(
        (status = 200, description = "Issues, newest first", body = ApiResponse<Vec<IssueResponseDto>>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Authority access required")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_issues(
    RequireAuthority(_user): RequireAuthority,
    State(state): State<AdminState>,
    AppQuery(query): AppQuery<IssueListQuery>,
    AppQuery(pagination): AppQuery<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<IssueResponseDto>>>> {
    let (issues, total) = state
        .issue_service
        .list(&query.into(), &pagination)
        .await?;

    let dtos = issues.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::success(
        Some(dtos),
        None,
        Some(Meta::paginated(total, &pagination)),
    )))
}

/// Update an issue's status, assignment, costs or notes
///
/// Only the fields in the request schema are accepted. Rejecting an issue
/// requires a rejection reason. The reporter is notified of status changes.
#[utoipa::path(
    patch,
    path = "/api/admin/issues/{id}",
    params(
        ("id" = Uuid, Path, description = "Issue ID")
    ),
    request_body = AuthorityUpdateIssueDto,
    responses(
        (status = 200, description = "Issue updated", body = ApiResponse<IssueResponseDto>),
        (status = 400, description = "Validation error or unknown field"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Authority access required"),
        (status = 404, description = "Issue not found")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_issue(
    RequireAuthority(user): RequireAuthority,
    State(state): State<AdminState>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<AuthorityUpdateIssueDto>,
) -> Result<Json<ApiResponse<IssueResponseDto>>> {
    dto.validate()?;

    let issue = state
        .issue_service
        .authority_update(id, &user.sub, &dto.into())
        .await?;
    Ok(Json(ApiResponse::success(Some(issue.into()), None, None)))
}

/// Issue statistics for the authority dashboard
#[utoipa::path(
    get,
    path = "/api/admin/stats",
    responses(
        (status = 200, description = "Issue statistics", body = ApiResponse<IssueStatsDto>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Authority access required")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_stats(
    RequireAuthority(_user): RequireAuthority,
    State(state): State<AdminState>,
) -> Result<Json<ApiResponse<IssueStatsDto>>> {
    let stats = state.admin_service.get_stats().await?;
    Ok(Json(ApiResponse::success(Some(stats), None, None)))
}
