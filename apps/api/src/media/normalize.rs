use std::io::Cursor;

use image::{
    codecs::jpeg::JpegEncoder, imageops::FilterType, DynamicImage, Rgb, RgbImage,
};
use serde::Serialize;
use tracing::debug;

use super::{data_url, MediaError};

/// Uploads are scaled down to fit inside a square of this edge length.
pub const MAX_EDGE: u32 = 800;
pub const JPEG_QUALITY: u8 = 70;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedImage {
    pub data_url: String,
    pub width: u32,
    pub height: u32,
}

/// Decodes an upload, fits it inside `MAX_EDGE`×`MAX_EDGE`, flattens transparency
/// onto white and re-encodes it as a JPEG `data:` URL.
pub fn normalize_upload(bytes: &[u8]) -> Result<NormalizedImage, MediaError> {
    let img = image::load_from_memory(bytes).map_err(|_| MediaError::NotAnImage)?;
    let (src_w, src_h) = (img.width(), img.height());
    let img = fit_within(img, MAX_EDGE, MAX_EDGE);
    let jpeg = encode_jpeg(&flatten_onto_white(&img), JPEG_QUALITY)?;
    debug!(
        src_w,
        src_h,
        out_w = img.width(),
        out_h = img.height(),
        bytes = jpeg.len(),
        "normalized upload"
    );
    Ok(NormalizedImage {
        data_url: data_url::encode_jpeg(&jpeg),
        width: img.width(),
        height: img.height(),
    })
}

/// Scales down to fit the box with the aspect ratio kept. Never scales up.
pub fn fit_within(img: DynamicImage, max_w: u32, max_h: u32) -> DynamicImage {
    if img.width() <= max_w && img.height() <= max_h {
        return img;
    }
    img.resize(max_w, max_h, FilterType::Triangle)
}

/// Composites the image over an opaque white background.
pub fn flatten_onto_white(img: &DynamicImage) -> RgbImage {
    let rgba = img.to_rgba8();
    let mut out = RgbImage::new(rgba.width(), rgba.height());
    for (x, y, px) in rgba.enumerate_pixels() {
        let [r, g, b, a] = px.0;
        let alpha = u16::from(a);
        let blend = |c: u8| ((u16::from(c) * alpha + 255 * (255 - alpha)) / 255) as u8;
        out.put_pixel(x, y, Rgb([blend(r), blend(g), blend(b)]));
    }
    out
}

pub fn encode_jpeg(img: &RgbImage, quality: u8) -> Result<Vec<u8>, MediaError> {
    let mut buf = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut buf, quality).encode_image(img)?;
    Ok(buf.into_inner())
}
