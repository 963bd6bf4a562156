use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for comment
#[derive(Debug, Clone, FromRow)]
pub struct Comment {
    pub id: Uuid,
    pub issue_id: Uuid,
    pub user_id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Data for creating a comment
#[derive(Debug, Clone)]
pub struct CreateComment {
    pub issue_id: Uuid,
    pub user_id: String,
    pub content: String,
}
