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
use crate::features::comments::dtos::{CommentResponseDto, CreateCommentDto};
use crate::features::comments::models::CreateComment;
use crate::features::comments::services::CommentService;
use crate::shared::types::{ApiResponse, Meta};

/// List comments on an issue
#[utoipa::path(
    get,
    path = "/api/issues/{id}/comments",
    params(
        ("id" = Uuid, Path, description = "Issue ID")
    ),
    responses(
        (status = 200, description = "Comments, oldest first", body = ApiResponse<Vec<CommentResponseDto>>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Issue not found")
    ),
    security(("bearer_auth" = [])),
    tag = "comments"
)]
pub async fn list_comments(
    _user: AuthenticatedUser,
    State(service): State<Arc<CommentService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<CommentResponseDto>>>> {
    let comments = service.list_by_issue(id).await?;
    let total = comments.len() as i64;
    let dtos: Vec<CommentResponseDto> = comments.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::success(
        Some(dtos),
        None,
        Some(Meta::total(total)),
    )))
}

/// Add a comment to an issue
#[utoipa::path(
    post,
    path = "/api/issues/{id}/comments",
    params(
        ("id" = Uuid, Path, description = "Issue ID")
    ),
    request_body = CreateCommentDto,
    responses(
        (status = 201, description = "Comment added", body = ApiResponse<CommentResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Issue not found")
    ),
    security(("bearer_auth" = [])),
    tag = "comments"
)]
pub async fn add_comment(
    user: AuthenticatedUser,
    State(service): State<Arc<CommentService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<CreateCommentDto>,
) -> Result<(StatusCode, Json<ApiResponse<CommentResponseDto>>)> {
    dto.validate()?;

    let comment = service
        .create(&CreateComment {
            issue_id: id,
            user_id: user.sub,
            content: dto.content,
        })
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(comment.into()), None, None)),
    ))
}
