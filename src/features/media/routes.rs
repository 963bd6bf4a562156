use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, post},
    Router,
};

use crate::features::media::handlers::{delete_media, upload_media};
use crate::features::media::models::MAX_MEDIA_SIZE;
use crate::features::media::services::MediaService;

/// Protected media routes
pub fn routes(service: Arc<MediaService>) -> Router {
    Router::new()
        .route(
            "/api/media/upload",
            // Room for multipart framing on top of the file itself
            post(upload_media).layer(DefaultBodyLimit::max(MAX_MEDIA_SIZE + 1024 * 1024)),
        )
        .route("/api/media", delete(delete_media))
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::StorageConfig;
    use crate::core::database::lazy_test_pool;
    use crate::modules::storage::SupabaseStorageClient;
    use crate::shared::test_helpers::with_citizen_auth;
    use axum::http::StatusCode;
    use axum_test::multipart::{MultipartForm, Part};
    use axum_test::TestServer;
    use serde_json::json;

    fn storage() -> Arc<SupabaseStorageClient> {
        let config = StorageConfig {
            endpoint: "http://127.0.0.1:1/storage/v1/s3".to_string(),
            public_base_url: "http://127.0.0.1:1/storage/v1/object/public".to_string(),
            access_key: "test".to_string(),
            secret_key: "test".to_string(),
            bucket: "issue-media".to_string(),
            region: "us-east-1".to_string(),
        };
        Arc::new(SupabaseStorageClient::new(&config).unwrap())
    }

    fn server() -> TestServer {
        let service = MediaService::new(lazy_test_pool(), storage());
        TestServer::new(with_citizen_auth(routes(Arc::new(service)))).unwrap()
    }

    fn png_part() -> Part {
        Part::bytes(vec![0x89, 0x50, 0x4e, 0x47])
            .file_name("pothole.png")
            .mime_type("image/png")
    }

    #[tokio::test]
    async fn test_upload_requires_kind() {
        let form = MultipartForm::new().add_part("file", png_part());
        let response = server().post("/api/media/upload").multipart(form).await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_upload_rejects_unknown_kind() {
        let form = MultipartForm::new()
            .add_text("kind", "video")
            .add_part("file", png_part());
        let response = server().post("/api/media/upload").multipart(form).await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_upload_requires_file() {
        let form = MultipartForm::new().add_text("kind", "image");
        let response = server().post("/api/media/upload").multipart(form).await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_upload_rejects_mismatched_type() {
        let form = MultipartForm::new()
            .add_text("kind", "audio")
            .add_part("file", png_part());
        let response = server().post("/api/media/upload").multipart(form).await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_delete_rejects_foreign_url() {
        let response = server()
            .delete("/api/media")
            .json(&json!({ "url": "https://example.com/cat.png" }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }
}
