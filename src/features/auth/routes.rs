use crate::features::auth::handlers;
use crate::features::auth::services::AuthService;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

/// Public auth routes (no authentication required)
pub fn public_routes(service: Arc<AuthService>) -> Router {
    Router::new()
        .route("/api/auth/sign-up", post(handlers::sign_up))
        .route("/api/auth/sign-in", post(handlers::sign_in))
        .with_state(service)
}

/// Protected auth routes (require JWT authentication)
pub fn protected_routes(service: Arc<AuthService>) -> Router {
    Router::new()
        .route("/api/auth/me", get(handlers::get_me))
        .route("/api/auth/sign-out", post(handlers::sign_out))
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::AuthConfig;
    use crate::core::middleware::auth_middleware;
    use crate::features::auth::clients::SupabaseAuthClient;
    use crate::features::auth::validator::tests::{sign, user_claims, validator};
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::json;
    use std::time::Duration;

    fn service() -> Arc<AuthService> {
        let config = AuthConfig {
            supabase_url: "http://127.0.0.1:1".to_string(),
            anon_key: "anon".to_string(),
            jwt_secret: None,
            audience: "authenticated".to_string(),
            jwks_cache_ttl: Duration::from_secs(60),
            jwt_leeway: Duration::from_secs(0),
        };
        Arc::new(AuthService::new(Arc::new(SupabaseAuthClient::new(&config))))
    }

    fn server() -> TestServer {
        let protected = protected_routes(service()).route_layer(
            axum::middleware::from_fn_with_state(Arc::new(validator()), auth_middleware),
        );
        let app = Router::new()
            .merge(public_routes(service()))
            .merge(protected);
        TestServer::new(app).unwrap()
    }

    #[tokio::test]
    async fn test_me_requires_token() {
        let response = server().get("/api/auth/me").await;
        response.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_me_rejects_malformed_header() {
        let response = server()
            .get("/api/auth/me")
            .add_header(
                axum::http::header::AUTHORIZATION,
                axum::http::HeaderValue::from_static("Token abc"),
            )
            .await;
        response.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_me_returns_caller() {
        let token = sign(user_claims("citizen-42", None));
        let response = server()
            .get("/api/auth/me")
            .authorization_bearer(token)
            .await;

        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body["data"]["id"], "citizen-42");
        assert_eq!(body["data"]["is_authority"], false);
    }

    #[tokio::test]
    async fn test_sign_up_validates_before_calling_supabase() {
        let response = server()
            .post("/api/auth/sign-up")
            .json(&json!({ "email": "not-an-email", "password": "secret123" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: serde_json::Value = response.json();
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_sign_in_rejects_malformed_json() {
        let response = server()
            .post("/api/auth/sign-in")
            .content_type("application/json")
            .bytes("{not json".into())
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }
}
