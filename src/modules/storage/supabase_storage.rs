//! Supabase Storage client (S3 protocol)
//!
//! Objects are written through the project's S3 endpoint with path-style
//! addressing. The bucket is expected to be public, so reads go straight to
//! the `/storage/v1/object/public` URL without signing.

use s3::creds::Credentials;
use s3::{Bucket, Region};
use tracing::{debug, info};

use crate::core::config::StorageConfig;
use crate::core::error::AppError;

pub struct SupabaseStorageClient {
    bucket: Box<Bucket>,
    public_base_url: String,
}

impl SupabaseStorageClient {
    /// Build the client. No request is made until the first upload.
    pub fn new(config: &StorageConfig) -> Result<Self, AppError> {
        let credentials = Credentials::new(
            Some(&config.access_key),
            Some(&config.secret_key),
            None,
            None,
            None,
        )
        .map_err(|e| AppError::Internal(format!("Failed to create storage credentials: {}", e)))?;

        let region = Region::Custom {
            region: config.region.clone(),
            endpoint: config.endpoint.clone(),
        };

        let mut bucket = Bucket::new(&config.bucket, region, credentials)
            .map_err(|e| AppError::Internal(format!("Failed to create storage bucket: {}", e)))?;

        // Supabase only supports path-style requests (endpoint/bucket/key)
        bucket.set_path_style();

        info!(
            "Storage client initialized for endpoint: {}, bucket: {}",
            config.endpoint, config.bucket
        );

        Ok(Self {
            bucket,
            public_base_url: config.public_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn bucket_name(&self) -> String {
        self.bucket.name()
    }

    /// Upload an object and return its key
    pub async fn upload(
        &self,
        key: &str,
        data: &[u8],
        content_type: &str,
    ) -> Result<String, AppError> {
        let response = self
            .bucket
            .put_object_with_content_type(key, data, content_type)
            .await
            .map_err(|e| {
                tracing::error!("Storage upload of '{}' failed: {}", key, e);
                AppError::ExternalServiceError(format!("Failed to upload file '{}'", key))
            })?;
        ensure_success(response.status_code(), "upload", key)?;

        debug!("Uploaded '{}' to bucket '{}'", key, self.bucket.name());
        Ok(key.to_string())
    }

    pub async fn delete(&self, key: &str) -> Result<(), AppError> {
        let response = self.bucket.delete_object(key).await.map_err(|e| {
            tracing::error!("Storage delete of '{}' failed: {}", key, e);
            AppError::ExternalServiceError(format!("Failed to delete file '{}'", key))
        })?;
        ensure_success(response.status_code(), "delete", key)?;

        debug!("Deleted '{}' from bucket '{}'", key, self.bucket.name());
        Ok(())
    }

    /// Public URL of an object in this bucket
    pub fn public_url(&self, key: &str) -> String {
        public_url(&self.public_base_url, &self.bucket.name(), key)
    }

    /// Inverse of [`Self::public_url`]; `None` for URLs outside this bucket
    pub fn key_from_url(&self, url: &str) -> Option<String> {
        key_from_url(&self.public_base_url, &self.bucket.name(), url)
    }
}

/// Storage answers refusals with a normal response, so the status decides
fn ensure_success(status: u16, action: &str, key: &str) -> Result<(), AppError> {
    if (200..300).contains(&status) {
        return Ok(());
    }
    tracing::error!("Storage {} of '{}' returned status {}", action, key, status);
    Err(AppError::ExternalServiceError(format!(
        "Failed to {} file '{}' (storage returned {})",
        action, key, status
    )))
}

fn public_url(base: &str, bucket: &str, key: &str) -> String {
    format!("{}/{}/{}", base, bucket, key)
}

fn key_from_url(base: &str, bucket: &str, url: &str) -> Option<String> {
    let prefix = format!("{}/{}/", base, bucket);
    url.strip_prefix(&prefix)
        .filter(|key| !key.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    const BASE: &str = "https://demo.supabase.co/storage/v1/object/public";

    #[test]
    fn test_public_url_round_trips_to_key() {
        let url = public_url(BASE, "issue-media", "image/user-1/abc.jpg");
        assert_eq!(
            url,
            "https://demo.supabase.co/storage/v1/object/public/issue-media/image/user-1/abc.jpg"
        );
        assert_eq!(
            key_from_url(BASE, "issue-media", &url).as_deref(),
            Some("image/user-1/abc.jpg")
        );
    }

    #[test]
    fn test_foreign_urls_have_no_key() {
        assert_eq!(
            key_from_url(BASE, "issue-media", "https://example.com/abc.jpg"),
            None
        );
        assert_eq!(
            key_from_url(BASE, "issue-media", &format!("{}/other-bucket/a.jpg", BASE)),
            None
        );
        assert_eq!(
            key_from_url(BASE, "issue-media", &format!("{}/issue-media/", BASE)),
            None
        );
    }

    #[test]
    fn test_client_builds_without_network() {
        let config = StorageConfig {
            endpoint: "https://demo.supabase.co/storage/v1/s3".to_string(),
            public_base_url: format!("{}/", BASE),
            access_key: "key".to_string(),
            secret_key: "secret".to_string(),
            bucket: "issue-media".to_string(),
            region: "us-east-1".to_string(),
        };
        let client = SupabaseStorageClient::new(&config).unwrap();
        assert_eq!(client.bucket_name(), "issue-media");
        assert_eq!(
            client.public_url("audio/u/x.webm"),
            format!("{}/issue-media/audio/u/x.webm", BASE)
        );
    }

    #[test]
    fn test_ensure_success_accepts_only_2xx() {
        assert!(ensure_success(200, "upload", "k").is_ok());
        assert!(ensure_success(204, "delete", "k").is_ok());
        assert!(matches!(
            ensure_success(403, "upload", "k"),
            Err(AppError::ExternalServiceError(_))
        ));
        assert!(ensure_success(500, "delete", "k").is_err());
    }

    /// Local endpoint that refuses every request with 403
    async fn refusing_endpoint() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                tokio::spawn(async move {
                    let mut buf = vec![0u8; 64 * 1024];
                    let _ = socket.read(&mut buf).await;
                    let _ = socket
                        .write_all(
                            b"HTTP/1.1 403 Forbidden\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
                        )
                        .await;
                    let _ = socket.shutdown().await;
                });
            }
        });
        format!("http://{}", addr)
    }

    fn client(endpoint: String) -> SupabaseStorageClient {
        SupabaseStorageClient::new(&StorageConfig {
            endpoint,
            public_base_url: BASE.to_string(),
            access_key: "test".to_string(),
            secret_key: "test".to_string(),
            bucket: "issue-media".to_string(),
            region: "us-east-1".to_string(),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_refused_upload_is_an_error() {
        let storage = client(refusing_endpoint().await);
        let result = storage
            .upload("image/u/x.jpg", b"\x89PNG", "image/png")
            .await;
        assert!(matches!(result, Err(AppError::ExternalServiceError(_))));
    }

    #[tokio::test]
    async fn test_refused_delete_is_an_error() {
        let storage = client(refusing_endpoint().await);
        let result = storage.delete("image/u/x.jpg").await;
        assert!(matches!(result, Err(AppError::ExternalServiceError(_))));
    }
}
