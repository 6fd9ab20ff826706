use base64::{engine::general_purpose::STANDARD, Engine};

use super::MediaError;

const IMAGE_PREFIX: &str = "data:image/";
const BASE64_MARKER: &str = ";base64,";

/// True for a base64 `data:image/...` URL with a non-empty payload.
pub fn is_image_data_url(s: &str) -> bool {
    let Some(rest) = s.trim().strip_prefix(IMAGE_PREFIX) else {
        return false;
    };
    match rest.split_once(BASE64_MARKER) {
        Some((subtype, payload)) => !subtype.is_empty() && !payload.is_empty(),
        None => false,
    }
}

pub fn encode_jpeg(bytes: &[u8]) -> String {
    format!("data:image/jpeg;base64,{}", STANDARD.encode(bytes))
}

/// Splits an image data URL into its MIME type and decoded bytes.
pub fn decode(s: &str) -> Result<(String, Vec<u8>), MediaError> {
    let s = s.trim();
    if !is_image_data_url(s) {
        return Err(MediaError::InvalidDataUrl);
    }
    let body = s.strip_prefix("data:").ok_or(MediaError::InvalidDataUrl)?;
    let (mime, payload) = body
        .split_once(BASE64_MARKER)
        .ok_or(MediaError::InvalidDataUrl)?;
    let bytes = STANDARD.decode(payload)?;
    Ok((mime.to_string(), bytes))
}
