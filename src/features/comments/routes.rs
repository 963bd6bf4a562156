use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::comments::handlers;
use crate::features::comments::services::CommentService;

/// Protected comment routes
pub fn routes(service: Arc<CommentService>) -> Router {
    Router::new()
        .route(
            "/api/issues/{id}/comments",
            get(handlers::list_comments).post(handlers::add_comment),
        )
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::database::lazy_test_pool;
    use crate::shared::test_helpers::with_citizen_auth;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::json;

    fn server() -> TestServer {
        let router = routes(Arc::new(CommentService::new(lazy_test_pool())));
        TestServer::new(with_citizen_auth(router)).unwrap()
    }

    #[tokio::test]
    async fn test_blank_comment_is_rejected() {
        let response = server()
            .post(&format!("/api/issues/{}/comments", uuid::Uuid::new_v4()))
            .json(&json!({ "content": "   " }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_overlong_comment_is_rejected() {
        let response = server()
            .post(&format!("/api/issues/{}/comments", uuid::Uuid::new_v4()))
            .json(&json!({ "content": "x".repeat(2001) }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }
}
