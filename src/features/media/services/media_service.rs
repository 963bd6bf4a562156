use std::sync::Arc;

use sqlx::PgPool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::media::models::{MediaFile, MediaKind};
use crate::modules::storage::SupabaseStorageClient;

const MEDIA_COLUMNS: &str = "id, file_key, kind, original_filename, content_type, file_size, \
    url, uploaded_by, created_at";

/// A file received from the client, not yet stored
#[derive(Debug)]
pub struct MediaUpload {
    pub kind: MediaKind,
    pub data: Vec<u8>,
    pub original_filename: String,
    pub content_type: String,
}

/// Service for media uploads
pub struct MediaService {
    pool: PgPool,
    storage: Arc<SupabaseStorageClient>,
}

impl MediaService {
    pub fn new(pool: PgPool, storage: Arc<SupabaseStorageClient>) -> Self {
        Self { pool, storage }
    }

    /// Store the file under `{kind}/{user_id}/{uuid}.{ext}` and record it.
    ///
    /// If the metadata insert fails the object stays in the bucket.
    pub async fn upload(&self, upload: MediaUpload, user_id: &str) -> Result<MediaFile> {
        let content_type = upload
            .kind
            .check_upload(&upload.content_type, upload.data.len())?
            .to_string();

        let file_key = upload
            .kind
            .object_key(user_id, Uuid::new_v4(), &content_type);
        self.storage
            .upload(&file_key, &upload.data, &content_type)
            .await?;
        let url = self.storage.public_url(&file_key);

        debug!("Media uploaded to storage: {}", file_key);

        let sql = format!(
            "INSERT INTO media_files \
             (file_key, kind, original_filename, content_type, file_size, url, uploaded_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING {}",
            MEDIA_COLUMNS
        );
        let file = sqlx::query_as::<_, MediaFile>(&sql)
            .bind(&file_key)
            .bind(upload.kind)
            .bind(&upload.original_filename)
            .bind(&content_type)
            .bind(upload.data.len() as i64)
            .bind(&url)
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to save media metadata for {}: {:?}", file_key, e);
                AppError::Database(e)
            })?;

        info!(
            "Media saved: id={}, key={}, kind={}, size={}",
            file.id,
            file.file_key,
            file.kind.as_str(),
            file.file_size
        );

        Ok(file)
    }

    /// Delete an upload by its public URL (uploader only)
    pub async fn delete_by_url(&self, url: &str, user_id: &str) -> Result<()> {
        let key = self
            .storage
            .key_from_url(url)
            .ok_or_else(|| AppError::BadRequest("URL does not belong to media storage".to_string()))?;

        let sql = format!("SELECT {} FROM media_files WHERE file_key = $1", MEDIA_COLUMNS);
        let file = sqlx::query_as::<_, MediaFile>(&sql)
            .bind(&key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to look up media {}: {:?}", key, e);
                AppError::Database(e)
            })?
            .ok_or_else(|| AppError::NotFound("File not found".to_string()))?;

        if file.uploaded_by != user_id {
            return Err(AppError::Forbidden(
                "You do not have permission to delete this file".to_string(),
            ));
        }

        self.storage.delete(&file.file_key).await?;

        sqlx::query("DELETE FROM media_files WHERE id = $1")
            .bind(file.id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete media metadata {}: {:?}", file.id, e);
                AppError::Database(e)
            })?;

        info!("Media deleted: id={}, key={}", file.id, file.file_key);

        Ok(())
    }
}
