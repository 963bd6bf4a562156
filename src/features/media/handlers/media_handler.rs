use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use tracing::debug;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::media::dtos::{DeleteMediaDto, MediaResponseDto, UploadMediaDto};
use crate::features::media::models::MediaKind;
use crate::features::media::services::{MediaService, MediaUpload};
use crate::shared::types::ApiResponse;

/// Upload a photo or voice note
///
/// Accepts multipart/form-data with:
/// - `file`: the file to upload (required)
/// - `kind`: "image" or "audio" (required)
#[utoipa::path(
    post,
    path = "/api/media/upload",
    tag = "media",
    request_body(
        content = UploadMediaDto,
        content_type = "multipart/form-data",
        description = "File upload form with the media kind",
    ),
    responses(
        (status = 201, description = "File uploaded", body = ApiResponse<MediaResponseDto>),
        (status = 400, description = "Missing field, wrong type or too large"),
        (status = 401, description = "Authentication required"),
        (status = 413, description = "Request body too large"),
        (status = 502, description = "Storage unavailable")
    ),
    security(("bearer_auth" = []))
)]
pub async fn upload_media(
    user: AuthenticatedUser,
    State(service): State<Arc<MediaService>>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<MediaResponseDto>>)> {
    let mut file: Option<(Vec<u8>, String, String)> = None;
    let mut kind: Option<MediaKind> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })? {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "file" => {
                let content_type = field
                    .content_type()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "application/octet-stream".to_string());
                let file_name = field
                    .file_name()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "unnamed".to_string());
                let data = field.bytes().await.map_err(|e| {
                    debug!("Failed to read file bytes: {}", e);
                    AppError::BadRequest(format!("Failed to read file data: {}", e))
                })?;

                file = Some((data.to_vec(), file_name, content_type));
            }
            "kind" => {
                let text = field.text().await.map_err(|e| {
                    AppError::BadRequest(format!("Failed to read kind field: {}", e))
                })?;
                kind = Some(MediaKind::parse(&text).ok_or_else(|| {
                    AppError::BadRequest(format!(
                        "Invalid kind '{}'. Expected 'image' or 'audio'",
                        text
                    ))
                })?);
            }
            _ => {
                debug!("Ignoring unknown field: {}", field_name);
            }
        }
    }

    let kind = kind.ok_or_else(|| AppError::BadRequest("Kind is required".to_string()))?;
    let (data, original_filename, content_type) =
        file.ok_or_else(|| AppError::BadRequest("File is required".to_string()))?;

    let media = service
        .upload(
            MediaUpload {
                kind,
                data,
                original_filename,
                content_type,
            },
            &user.sub,
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(media.into()),
            Some("File uploaded".to_string()),
            None,
        )),
    ))
}

/// Delete an upload by its public URL
///
/// Only the uploader can delete a file.
#[utoipa::path(
    delete,
    path = "/api/media",
    tag = "media",
    request_body = DeleteMediaDto,
    responses(
        (status = 200, description = "File deleted", body = ApiResponse<serde_json::Value>),
        (status = 400, description = "URL is not a media storage URL"),
        (status = 401, description = "Authentication required"),
        (status = 403, description = "Not the uploader"),
        (status = 404, description = "File not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_media(
    user: AuthenticatedUser,
    State(service): State<Arc<MediaService>>,
    AppJson(dto): AppJson<DeleteMediaDto>,
) -> Result<Json<ApiResponse<()>>> {
    dto.validate()?;

    service.delete_by_url(&dto.url, &user.sub).await?;

    Ok(Json(ApiResponse::success(
        None,
        Some("File deleted".to_string()),
        None,
    )))
}
