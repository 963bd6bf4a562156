use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::media::models::{MediaFile, MediaKind};

/// Upload form, for OpenAPI documentation only.
/// The handler reads the multipart stream directly.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct UploadMediaDto {
    /// The file to upload
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub file: String,
    /// "image" or "audio"
    #[schema(example = "image")]
    pub kind: String,
}

/// Response DTO for an uploaded file
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MediaResponseDto {
    pub id: Uuid,
    pub kind: MediaKind,
    pub original_filename: String,
    pub content_type: String,
    pub file_size: i64,
    /// Public URL, usable as the issue's image_url / audio_url
    pub url: String,
    pub created_at: DateTime<Utc>,
}

impl From<MediaFile> for MediaResponseDto {
    fn from(f: MediaFile) -> Self {
        Self {
            id: f.id,
            kind: f.kind,
            original_filename: f.original_filename,
            content_type: f.content_type,
            file_size: f.file_size,
            url: f.url,
            created_at: f.created_at,
        }
    }
}

/// Request DTO for deleting an upload by URL
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct DeleteMediaDto {
    #[validate(url(message = "Invalid URL format"))]
    pub url: String,
}
