use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::export::ExportError;
use crate::media::MediaError;
use crate::store::StoreError;
use crate::wizard::validation::WizardError;

/// Message shown when a session's records no longer fit in its storage quota.
pub const STORAGE_LIMIT_MESSAGE: &str =
    "Storage quota exceeded. Please delete some items before saving more.";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Wizard(#[from] WizardError),

    #[error("Storage limit reached")]
    StorageLimit,

    #[error("Storage error: {0}")]
    Storage(StoreError),

    #[error("Media error: {0}")]
    Media(#[from] MediaError),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::QuotaExceeded { .. } => AppError::StorageLimit,
            other => AppError::Storage(other),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, fields) = match &self {
            AppError::Wizard(WizardError::Validation(fields)) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                "One or more fields are invalid".to_string(),
                Some(fields.clone()),
            ),
            AppError::Wizard(e @ WizardError::CapacityExceeded { .. }) => {
                (StatusCode::CONFLICT, "CAPACITY_EXCEEDED", e.to_string(), None)
            }
            AppError::Wizard(e @ WizardError::AlreadyExists(_)) => {
                (StatusCode::CONFLICT, "ALREADY_EXISTS", e.to_string(), None)
            }
            AppError::Wizard(e @ WizardError::NotFound { .. }) => {
                (StatusCode::NOT_FOUND, "NOT_FOUND", e.to_string(), None)
            }
            AppError::StorageLimit => (
                StatusCode::INSUFFICIENT_STORAGE,
                "STORAGE_LIMIT",
                STORAGE_LIMIT_MESSAGE.to_string(),
                None,
            ),
            AppError::Storage(e) => {
                tracing::error!("Storage error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STORAGE_ERROR",
                    "A storage error occurred".to_string(),
                    None,
                )
            }
            AppError::Media(e) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "MEDIA_ERROR",
                e.to_string(),
                None,
            ),
            AppError::Export(e) => {
                tracing::error!("Export error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "EXPORT_ERROR",
                    "The document could not be exported".to_string(),
                    None,
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                    None,
                )
            }
        };

        let mut error = json!({
            "code": code,
            "message": message,
        });
        if let Some(fields) = fields {
            error["fields"] = json!(fields.0);
        }

        (status, Json(json!({ "error": error }))).into_response()
    }
}
