use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::issues::dtos::{
    CreateIssueDto, DuplicateCheckDto, DuplicateCheckResponseDto, IssueResponseDto,
    UpdateIssueDto,
};
use crate::features::issues::services::{DuplicateDraft, DuplicateService, IssueService};
use crate::shared::types::{ApiResponse, Meta};

/// State for issue handlers
#[derive(Clone)]
pub struct IssueState {
    pub issue_service: Arc<IssueService>,
    pub duplicate_service: Arc<DuplicateService>,
}

/// Look for open issues that may describe the same problem as a draft
#[utoipa::path(
    post,
    path = "/api/issues/duplicates",
    request_body = DuplicateCheckDto,
    responses(
        (status = 200, description = "Duplicate candidates (0-5)", body = ApiResponse<DuplicateCheckResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "issues"
)]
pub async fn check_duplicates(
    _user: AuthenticatedUser,
    State(state): State<IssueState>,
    AppJson(dto): AppJson<DuplicateCheckDto>,
) -> Result<Json<ApiResponse<DuplicateCheckResponseDto>>> {
    dto.validate()?;

    let draft = DuplicateDraft::from(dto);
    let checked = draft.is_checkable();
    let candidates = state.duplicate_service.find_candidates(&draft).await;

    let dto = DuplicateCheckResponseDto {
        checked,
        candidates: candidates.into_iter().map(Into::into).collect(),
    };
    Ok(Json(ApiResponse::success(Some(dto), None, None)))
}

/// Report a new issue
#[utoipa::path(
    post,
    path = "/api/issues",
    request_body = CreateIssueDto,
    responses(
        (status = 201, description = "Issue created", body = ApiResponse<IssueResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "issues"
)]
pub async fn create_issue(
    user: AuthenticatedUser,
    State(state): State<IssueState>,
    AppJson(dto): AppJson<CreateIssueDto>,
) -> Result<(StatusCode, Json<ApiResponse<IssueResponseDto>>)> {
    dto.validate()?;

    let issue = state
        .issue_service
        .create(&dto.into_create(&user.sub))
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(issue.into()),
            Some("Issue reported".to_string()),
            None,
        )),
    ))
}

/// Support an existing open issue instead of filing a duplicate
#[utoipa::path(
    post,
    path = "/api/issues/{id}/support",
    params(
        ("id" = Uuid, Path, description = "Issue ID")
    ),
    responses(
        (status = 200, description = "Complaint count incremented", body = ApiResponse<IssueResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Issue not found"),
        (status = 409, description = "Issue already resolved or rejected")
    ),
    security(("bearer_auth" = [])),
    tag = "issues"
)]
pub async fn support_issue(
    user: AuthenticatedUser,
    State(state): State<IssueState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<IssueResponseDto>>> {
    let issue = state.issue_service.support(id, &user.sub).await?;
    Ok(Json(ApiResponse::success(
        Some(issue.into()),
        Some("Thanks, your support was added to this issue".to_string()),
        None,
    )))
}

/// List the caller's issues
#[utoipa::path(
    get,
    path = "/api/issues/mine",
    responses(
        (status = 200, description = "Caller's issues, newest first", body = ApiResponse<Vec<IssueResponseDto>>),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "issues"
)]
pub async fn list_my_issues(
    user: AuthenticatedUser,
    State(state): State<IssueState>,
) -> Result<Json<ApiResponse<Vec<IssueResponseDto>>>> {
    let issues = state.issue_service.list_by_user(&user.sub).await?;
    let total = issues.len() as i64;
    let dtos: Vec<IssueResponseDto> = issues.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::success(
        Some(dtos),
        None,
        Some(Meta::total(total)),
    )))
}

/// Get issue by ID
#[utoipa::path(
    get,
    path = "/api/issues/{id}",
    params(
        ("id" = Uuid, Path, description = "Issue ID")
    ),
    responses(
        (status = 200, description = "Issue found", body = ApiResponse<IssueResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Issue not found")
    ),
    security(("bearer_auth" = [])),
    tag = "issues"
)]
pub async fn get_issue(
    _user: AuthenticatedUser,
    State(state): State<IssueState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<IssueResponseDto>>> {
    let issue = state.issue_service.get_by_id(id).await?;
    Ok(Json(ApiResponse::success(Some(issue.into()), None, None)))
}

/// Edit a pending issue (reporter only)
#[utoipa::path(
    put,
    path = "/api/issues/{id}",
    params(
        ("id" = Uuid, Path, description = "Issue ID")
    ),
    request_body = UpdateIssueDto,
    responses(
        (status = 200, description = "Issue updated", body = ApiResponse<IssueResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not the reporter"),
        (status = 404, description = "Issue not found"),
        (status = 409, description = "Issue is no longer pending")
    ),
    security(("bearer_auth" = [])),
    tag = "issues"
)]
pub async fn update_issue(
    user: AuthenticatedUser,
    State(state): State<IssueState>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateIssueDto>,
) -> Result<Json<ApiResponse<IssueResponseDto>>> {
    dto.validate()?;

    let issue = state
        .issue_service
        .update_by_reporter(id, &user.sub, &dto.into())
        .await?;
    Ok(Json(ApiResponse::success(Some(issue.into()), None, None)))
}

/// Withdraw (delete) an issue (reporter only)
#[utoipa::path(
    delete,
    path = "/api/issues/{id}",
    params(
        ("id" = Uuid, Path, description = "Issue ID")
    ),
    responses(
        (status = 200, description = "Issue withdrawn"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not the reporter"),
        (status = 404, description = "Issue not found")
    ),
    security(("bearer_auth" = [])),
    tag = "issues"
)]
pub async fn withdraw_issue(
    user: AuthenticatedUser,
    State(state): State<IssueState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    state.issue_service.withdraw(id, &user.sub).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Issue withdrawn".to_string()),
        None,
    )))
}
