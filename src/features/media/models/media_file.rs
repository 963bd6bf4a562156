use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::core::error::{AppError, Result};

/// Maximum upload size in bytes (10MB)
pub const MAX_MEDIA_SIZE: usize = 10 * 1024 * 1024;

/// What an uploaded file is used for, matching database enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "media_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Audio,
}

impl MediaKind {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "image" => Some(MediaKind::Image),
            "audio" => Some(MediaKind::Audio),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Audio => "audio",
        }
    }

    /// MIME types accepted for this kind
    pub fn allowed_content_types(self) -> &'static [&'static str] {
        match self {
            MediaKind::Image => &[
                "image/jpeg",
                "image/png",
                "image/webp",
                "image/gif",
                "image/heic",
            ],
            MediaKind::Audio => &[
                "audio/webm",
                "audio/ogg",
                "audio/mpeg",
                "audio/mp4",
                "audio/wav",
            ],
        }
    }

    /// Extension used in the object key
    pub fn extension_for(content_type: &str) -> Option<&'static str> {
        match content_type {
            "image/jpeg" => Some("jpg"),
            "image/png" => Some("png"),
            "image/webp" => Some("webp"),
            "image/gif" => Some("gif"),
            "image/heic" => Some("heic"),
            "audio/webm" => Some("webm"),
            "audio/ogg" => Some("ogg"),
            "audio/mpeg" => Some("mp3"),
            "audio/mp4" => Some("m4a"),
            "audio/wav" => Some("wav"),
            _ => None,
        }
    }

    /// Check an upload against the size limit and this kind's MIME types.
    ///
    /// Parameters such as `;codecs=opus` are ignored. Returns the bare MIME type.
    pub fn check_upload<'a>(self, content_type: &'a str, size: usize) -> Result<&'a str> {
        if size == 0 {
            return Err(AppError::BadRequest("File is empty".to_string()));
        }
        if size > MAX_MEDIA_SIZE {
            return Err(AppError::BadRequest(format!(
                "File too large. Maximum size is {} MB",
                MAX_MEDIA_SIZE / 1024 / 1024
            )));
        }

        let mime = content_type
            .split(';')
            .next()
            .unwrap_or(content_type)
            .trim();
        if !self.allowed_content_types().contains(&mime) {
            return Err(AppError::BadRequest(format!(
                "File type '{}' is not allowed for {}. Allowed types: {}",
                mime,
                self.as_str(),
                self.allowed_content_types().join(", ")
            )));
        }

        Ok(mime)
    }

    /// Object key: `{kind}/{user_id}/{id}.{ext}`
    pub fn object_key(self, user_id: &str, id: Uuid, content_type: &str) -> String {
        let extension = Self::extension_for(content_type).unwrap_or("bin");
        format!("{}/{}/{}.{}", self.as_str(), user_id, id, extension)
    }
}

/// Database model for uploaded media metadata
#[derive(Debug, Clone, FromRow)]
pub struct MediaFile {
    pub id: Uuid,
    pub file_key: String,
    pub kind: MediaKind,
    pub original_filename: String,
    pub content_type: String,
    pub file_size: i64,
    pub url: String,
    pub uploaded_by: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_kind() {
        assert_eq!(MediaKind::parse(" Image "), Some(MediaKind::Image));
        assert_eq!(MediaKind::parse("audio"), Some(MediaKind::Audio));
        assert_eq!(MediaKind::parse("video"), None);
    }

    #[test]
    fn test_check_upload_strips_codec_parameters() {
        assert_eq!(
            MediaKind::Audio
                .check_upload("audio/webm;codecs=opus", 1024)
                .unwrap(),
            "audio/webm"
        );
    }

    #[test]
    fn test_check_upload_rejects_wrong_kind() {
        assert!(MediaKind::Image.check_upload("audio/webm", 1024).is_err());
        assert!(MediaKind::Audio.check_upload("image/png", 1024).is_err());
        assert!(MediaKind::Image.check_upload("application/pdf", 1024).is_err());
    }

    #[test]
    fn test_check_upload_enforces_size() {
        assert!(MediaKind::Image.check_upload("image/png", 0).is_err());
        assert!(MediaKind::Image
            .check_upload("image/png", MAX_MEDIA_SIZE)
            .is_ok());
        assert!(MediaKind::Image
            .check_upload("image/png", MAX_MEDIA_SIZE + 1)
            .is_err());
    }

    #[test]
    fn test_object_key_layout() {
        let id = Uuid::nil();
        assert_eq!(
            MediaKind::Image.object_key("user-7", id, "image/jpeg"),
            "image/user-7/00000000-0000-0000-0000-000000000000.jpg"
        );
        assert_eq!(
            MediaKind::Audio.object_key("user-7", id, "audio/mpeg"),
            "audio/user-7/00000000-0000-0000-0000-000000000000.mp3"
        );
    }
}
