use std::sync::Arc;

use axum::{
    routing::{get, patch},
    Router,
};

use crate::features::notifications::handlers;
use crate::features::notifications::services::NotificationService;

/// Protected notification routes
pub fn routes(service: Arc<NotificationService>) -> Router {
    Router::new()
        .route("/api/notifications", get(handlers::list_notifications))
        .route(
            "/api/notifications/{id}/read",
            patch(handlers::mark_notification_read),
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

    fn server(authenticated: bool) -> TestServer {
        let router = routes(Arc::new(NotificationService::new(lazy_test_pool())));
        let router = if authenticated {
            with_citizen_auth(router)
        } else {
            router
        };
        TestServer::new(router).unwrap()
    }

    #[tokio::test]
    async fn test_list_requires_identity() {
        server(false)
            .get("/api/notifications")
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_mark_read_rejects_bad_id() {
        server(true)
            .patch("/api/notifications/not-a-uuid/read")
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }
}
