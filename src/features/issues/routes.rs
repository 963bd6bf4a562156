use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::issues::handlers::{self, IssueState};
use crate::features::issues::services::{DuplicateService, IssueService};

/// Citizen issue routes (require auth middleware to be applied by caller)
pub fn routes(issue_service: Arc<IssueService>, duplicate_service: Arc<DuplicateService>) -> Router {
    let state = IssueState {
        issue_service,
        duplicate_service,
    };

    Router::new()
        .route("/api/issues", post(handlers::create_issue))
        .route("/api/issues/duplicates", post(handlers::check_duplicates))
        .route("/api/issues/mine", get(handlers::list_my_issues))
        .route(
            "/api/issues/{id}",
            get(handlers::get_issue)
                .put(handlers::update_issue)
                .delete(handlers::withdraw_issue),
        )
        .route("/api/issues/{id}/support", post(handlers::support_issue))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::database::lazy_test_pool;
    use crate::shared::test_helpers::with_citizen_auth;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::json;

    fn router() -> Router {
        let pool = lazy_test_pool();
        routes(
            Arc::new(IssueService::new(pool.clone())),
            Arc::new(DuplicateService::new(pool)),
        )
    }

    fn server() -> TestServer {
        TestServer::new(with_citizen_auth(router())).unwrap()
    }

    #[tokio::test]
    async fn test_routes_require_identity() {
        let server = TestServer::new(router()).unwrap();
        server
            .get("/api/issues/mine")
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
        server
            .post("/api/issues")
            .json(&json!({ "title": "Streetlight out", "category": "streetlight" }))
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_short_title_duplicate_check_is_empty() {
        let response = server()
            .post("/api/issues/duplicates")
            .json(&json!({ "title": "Pothole", "category": "pothole" }))
            .await;

        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body["data"]["checked"], false);
        assert_eq!(body["data"]["candidates"], json!([]));
    }

    #[tokio::test]
    async fn test_duplicate_check_fails_open_when_store_is_down() {
        let response = server()
            .post("/api/issues/duplicates")
            .json(&json!({
                "title": "Large pothole on Main Street near school",
                "category": "pothole",
                "latitude": 40.7128,
                "longitude": -74.0060
            }))
            .await;

        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body["data"]["checked"], true);
        assert_eq!(body["data"]["candidates"], json!([]));
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_body() {
        let response = server()
            .post("/api/issues")
            .json(&json!({ "title": "ok", "category": "pothole" }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);

        let response = server()
            .post("/api/issues")
            .json(&json!({ "title": "Streetlight out", "category": "volcano" }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_edit_cannot_change_status() {
        let response = server()
            .put(&format!("/api/issues/{}", uuid::Uuid::new_v4()))
            .json(&json!({ "status": "resolved" }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_support_rejects_bad_id() {
        server()
            .post("/api/issues/not-a-uuid/support")
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }
}
