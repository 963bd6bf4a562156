use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for feedback
#[derive(Debug, Clone, FromRow)]
pub struct Feedback {
    pub id: Uuid,
    pub issue_id: Uuid,
    pub user_id: String,
    pub rating: i16,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Data for creating feedback
#[derive(Debug, Clone)]
pub struct CreateFeedback {
    pub issue_id: Uuid,
    pub user_id: String,
    pub rating: i16,
    pub comment: Option<String>,
}
