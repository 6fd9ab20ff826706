//! Image uploads: decoding, normalization to a bounded JPEG, and `data:` URL handling.

pub mod data_url;
pub mod handlers;
pub mod normalize;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("Selected file is not an image")]
    NotAnImage,

    #[error("Malformed data URL")]
    InvalidDataUrl,

    #[error("Invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Image could not be processed: {0}")]
    Image(#[from] image::ImageError),

    #[error("Upload could not be read: {0}")]
    Upload(#[from] axum::extract::multipart::MultipartError),

    #[error("No file field in upload")]
    MissingFile,
}
