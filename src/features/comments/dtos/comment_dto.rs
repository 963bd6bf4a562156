use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::comments::models::Comment;
use crate::shared::validation::validate_not_blank;

/// Request DTO for adding a comment
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateCommentDto {
    #[validate(
        length(min = 1, max = 2000, message = "Comment must be 1-2000 characters"),
        custom(function = "validate_not_blank", message = "Comment must not be blank")
    )]
    pub content: String,
}

/// Response DTO for comment
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CommentResponseDto {
    pub id: Uuid,
    pub issue_id: Uuid,
    pub user_id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl From<Comment> for CommentResponseDto {
    fn from(c: Comment) -> Self {
        Self {
            id: c.id,
            issue_id: c.issue_id,
            user_id: c.user_id,
            content: c.content,
            created_at: c.created_at,
        }
    }
}
