use axum::{extract::Multipart, Json};

use super::normalize::{normalize_upload, NormalizedImage};
use super::MediaError;
use crate::errors::AppError;

/// POST /api/v1/media/normalize
/// Multipart upload with a `file` field. Returns the normalized JPEG as a data URL,
/// ready for the `select_image` or `add_screenshot` actions.
pub async fn handle_normalize(
    mut multipart: Multipart,
) -> Result<Json<NormalizedImage>, AppError> {
    while let Some(field) = multipart.next_field().await.map_err(MediaError::from)? {
        if field.name() != Some("file") {
            continue;
        }
        let bytes = field.bytes().await.map_err(MediaError::from)?;
        let normalized = tokio::task::spawn_blocking(move || normalize_upload(&bytes))
            .await
            .map_err(anyhow::Error::from)??;
        return Ok(Json(normalized));
    }
    Err(MediaError::MissingFile.into())
}
