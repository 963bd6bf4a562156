use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::geocoding::handlers;
use crate::features::geocoding::services::GeocodingService;

/// Protected geocoding routes
pub fn routes(service: Arc<GeocodingService>) -> Router {
    Router::new()
        .route("/api/geocode/reverse", get(handlers::reverse_geocode))
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::GeocodingConfig;
    use crate::shared::test_helpers::with_citizen_auth;
    use axum::http::StatusCode;
    use axum_test::TestServer;

    fn server() -> TestServer {
        let service = GeocodingService::new(&GeocodingConfig {
            nominatim_url: "http://127.0.0.1:1".to_string(),
            user_agent: "test".to_string(),
        })
        .unwrap();
        TestServer::new(with_citizen_auth(routes(Arc::new(service)))).unwrap()
    }

    #[tokio::test]
    async fn test_out_of_range_latitude_is_rejected() {
        server()
            .get("/api/geocode/reverse?lat=95.0&lng=77.2")
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_missing_longitude_is_rejected() {
        server()
            .get("/api/geocode/reverse?lat=28.6")
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_upstream_failure_is_bad_gateway() {
        server()
            .get("/api/geocode/reverse?lat=28.6&lng=77.2")
            .await
            .assert_status(StatusCode::BAD_GATEWAY);
    }
}
