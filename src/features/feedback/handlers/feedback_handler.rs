use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::Result;
use crate::core::extractor::{AppJson, AppQuery};
use crate::features::auth::guards::RequireAuthority;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::feedback::dtos::{CreateFeedbackDto, FeedbackResponseDto};
use crate::features::feedback::models::CreateFeedback;
use crate::features::feedback::services::FeedbackService;
use crate::shared::types::{ApiResponse, Meta, PaginationQuery};

/// Rate how a resolved issue was handled (reporter only)
#[utoipa::path(
    post,
    path = "/api/issues/{id}/feedback",
    params(
        ("id" = Uuid, Path, description = "Issue ID")
    ),
    request_body = CreateFeedbackDto,
    responses(
        (status = 201, description = "Feedback recorded", body = ApiResponse<FeedbackResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not the reporter"),
        (status = 404, description = "Issue not found"),
        (status = 409, description = "Issue not resolved or feedback already given")
    ),
    security(("bearer_auth" = [])),
    tag = "feedback"
)]
pub async fn submit_feedback(
    user: AuthenticatedUser,
    State(service): State<Arc<FeedbackService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<CreateFeedbackDto>,
) -> Result<(StatusCode, Json<ApiResponse<FeedbackResponseDto>>)> {
    dto.validate()?;

    let feedback = service
        .create(&CreateFeedback {
            issue_id: id,
            user_id: user.sub,
            rating: dto.rating,
            comment: dto.comment.filter(|c| !c.trim().is_empty()),
        })
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(feedback.into()),
            Some("Thank you for your feedback".to_string()),
            None,
        )),
    ))
}

/// List citizen feedback (authority only)
#[utoipa::path(
    get,
    path = "/api/admin/feedback",
    params(PaginationQuery),
    responses(
        (status = 200, description = "Feedback, newest first", body = ApiResponse<Vec<FeedbackResponseDto>>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Authority access required")
    ),
    security(("bearer_auth" = [])),
    tag = "admin"
)]
pub async fn list_feedback(
    RequireAuthority(_user): RequireAuthority,
    State(service): State<Arc<FeedbackService>>,
    AppQuery(pagination): AppQuery<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<FeedbackResponseDto>>>> {
    let (feedback, total) = service.list(&pagination).await?;
    let dtos = feedback.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::success(
        Some(dtos),
        None,
        Some(Meta::paginated(total, &pagination)),
    )))
}
