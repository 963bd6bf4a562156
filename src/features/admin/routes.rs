use std::sync::Arc;

use axum::{
    routing::{get, patch},
    Router,
};

use crate::features::admin::handlers::{self, AdminState};
use crate::features::admin::services::AdminService;
use crate::features::issues::services::IssueService;

/// Authority portal routes, nested under `/api/admin` by the caller
pub fn routes(admin_service: Arc<AdminService>, issue_service: Arc<IssueService>) -> Router {
    let state = AdminState {
        admin_service,
        issue_service,
    };

    Router::new()
        .route("/issues", get(handlers::list_issues))
        .route("/issues/{id}", patch(handlers::update_issue))
        .route("/stats", get(handlers::get_stats))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::database::lazy_test_pool;
    use crate::shared::test_helpers::{with_authority_auth, with_citizen_auth};
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::json;

    fn router() -> Router {
        let pool = lazy_test_pool();
        Router::new().nest(
            "/api/admin",
            routes(
                Arc::new(AdminService::new(pool.clone())),
                Arc::new(IssueService::new(pool)),
            ),
        )
    }

    #[tokio::test]
    async fn test_citizen_is_forbidden() {
        let server = TestServer::new(with_citizen_auth(router())).unwrap();
        server
            .get("/api/admin/issues")
            .await
            .assert_status(StatusCode::FORBIDDEN);
        server
            .get("/api/admin/stats")
            .await
            .assert_status(StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_missing_identity_is_unauthorized() {
        let server = TestServer::new(router()).unwrap();
        server
            .get("/api/admin/stats")
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_update_rejects_fields_outside_allow_list() {
        let server = TestServer::new(with_authority_auth(router())).unwrap();
        let response = server
            .patch(&format!("/api/admin/issues/{}", uuid::Uuid::new_v4()))
            .json(&json!({ "status": "in_progress", "complaint_count": 99 }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_update_rejects_unknown_status() {
        let server = TestServer::new(with_authority_auth(router())).unwrap();
        let response = server
            .patch(&format!("/api/admin/issues/{}", uuid::Uuid::new_v4()))
            .json(&json!({ "status": "closed" }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }
}
