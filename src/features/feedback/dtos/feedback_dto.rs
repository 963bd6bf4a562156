use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::feedback::models::Feedback;

/// Request DTO for rating a resolved issue
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateFeedbackDto {
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: i16,

    #[validate(length(max = 2000, message = "Comment must not exceed 2000 characters"))]
    pub comment: Option<String>,
}

/// Response DTO for feedback
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FeedbackResponseDto {
    pub id: Uuid,
    pub issue_id: Uuid,
    pub user_id: String,
    pub rating: i16,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Feedback> for FeedbackResponseDto {
    fn from(f: Feedback) -> Self {
        Self {
            id: f.id,
            issue_id: f.issue_id,
            user_id: f.user_id,
            rating: f.rating,
            comment: f.comment,
            created_at: f.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_range() {
        for (rating, ok) in [(0, false), (1, true), (5, true), (6, false)] {
            let dto = CreateFeedbackDto {
                rating,
                comment: None,
            };
            assert_eq!(dto.validate().is_ok(), ok, "rating {rating}");
        }
    }
}
