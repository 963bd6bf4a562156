use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::feedback::handlers;
use crate::features::feedback::services::FeedbackService;

/// Citizen feedback routes
pub fn routes(service: Arc<FeedbackService>) -> Router {
    Router::new()
        .route("/api/issues/{id}/feedback", post(handlers::submit_feedback))
        .with_state(service)
}

/// Authority routes
pub fn admin_routes(service: Arc<FeedbackService>) -> Router {
    Router::new()
        .route("/api/admin/feedback", get(handlers::list_feedback))
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
        let service = Arc::new(FeedbackService::new(lazy_test_pool()));
        let router = Router::new()
            .merge(routes(service.clone()))
            .merge(admin_routes(service));
        TestServer::new(with_citizen_auth(router)).unwrap()
    }

    #[tokio::test]
    async fn test_rating_out_of_range_is_rejected() {
        let response = server()
            .post(&format!("/api/issues/{}/feedback", uuid::Uuid::new_v4()))
            .json(&json!({ "rating": 9 }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_citizen_cannot_list_feedback() {
        server()
            .get("/api/admin/feedback")
            .await
            .assert_status(StatusCode::FORBIDDEN);
    }
}
