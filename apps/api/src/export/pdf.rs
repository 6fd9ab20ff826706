//! Serializes laid-out pages into a PDF with `lopdf`.

use image::imageops::FilterType;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};
use tracing::warn;

use super::font_metrics::{encode_win_ansi, Font};
use super::layout::{DrawOp, PageLayout, PAGE_HEIGHT, PAGE_WIDTH};
use super::ExportError;
use crate::document::theme::Rgb;
use crate::media::data_url;
use crate::media::normalize::{encode_jpeg, flatten_onto_white};

const EMBED_JPEG_QUALITY: u8 = 85;

/// A decoded image ready to embed, in device pixels.
struct EmbeddedImage {
    jpeg: Vec<u8>,
    width_px: u32,
    height_px: u32,
}

/// Decodes a `data:` URL and rasterizes it for a box of `w`×`h` points at `scale`
/// pixels per point, flattened onto white.
fn rasterize(url: &str, w: f32, h: f32, scale: u32) -> Result<EmbeddedImage, ExportError> {
    let (_, bytes) = data_url::decode(url)?;
    let img = image::load_from_memory(&bytes).map_err(crate::media::MediaError::from)?;
    let target_w = ((w * scale as f32).round() as u32).max(1);
    let target_h = ((h * scale as f32).round() as u32).max(1);
    let img = img.resize(target_w, target_h, FilterType::Triangle);
    let rgb = flatten_onto_white(&img);
    Ok(EmbeddedImage {
        jpeg: encode_jpeg(&rgb, EMBED_JPEG_QUALITY)?,
        width_px: rgb.width(),
        height_px: rgb.height(),
    })
}

fn color_operands(color: Rgb) -> Vec<Object> {
    let (r, g, b) = color.unit();
    vec![r.into(), g.into(), b.into()]
}

fn media_box() -> Vec<Object> {
    vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()]
}

/// Builds one page's content stream, registering its images as XObjects on `doc`.
fn page_content(
    doc: &mut Document,
    layout: &PageLayout,
    scale: u32,
) -> Result<(Vec<Operation>, Dictionary), ExportError> {
    let mut ops = Vec::new();
    let mut xobjects = Dictionary::new();

    for op in &layout.ops {
        match op {
            DrawOp::Rect { x, y, w, h, color } => {
                ops.push(Operation::new("rg", color_operands(*color)));
                ops.push(Operation::new(
                    "re",
                    vec![(*x).into(), (*y).into(), (*w).into(), (*h).into()],
                ));
                ops.push(Operation::new("f", vec![]));
            }
            DrawOp::Line {
                x1,
                y1,
                x2,
                y2,
                width,
                color,
            } => {
                ops.push(Operation::new("RG", color_operands(*color)));
                ops.push(Operation::new("w", vec![(*width).into()]));
                ops.push(Operation::new("m", vec![(*x1).into(), (*y1).into()]));
                ops.push(Operation::new("l", vec![(*x2).into(), (*y2).into()]));
                ops.push(Operation::new("S", vec![]));
            }
            DrawOp::Text {
                x,
                y,
                size,
                font,
                color,
                text,
            } => {
                ops.push(Operation::new("BT", vec![]));
                ops.push(Operation::new("rg", color_operands(*color)));
                ops.push(Operation::new(
                    "Tf",
                    vec![font.resource_name().into(), (*size).into()],
                ));
                ops.push(Operation::new("Td", vec![(*x).into(), (*y).into()]));
                ops.push(Operation::new(
                    "Tj",
                    vec![Object::string_literal(encode_win_ansi(text))],
                ));
                ops.push(Operation::new("ET", vec![]));
            }
            DrawOp::Image {
                x,
                y,
                w,
                h,
                data_url,
            } => {
                let image = match rasterize(data_url, *w, *h, scale) {
                    Ok(image) => image,
                    Err(e) => {
                        warn!("skipping image that failed to decode: {e}");
                        continue;
                    }
                };
                let draw_w = image.width_px as f32 / scale as f32;
                let draw_h = image.height_px as f32 / scale as f32;
                let draw_x = x + (w - draw_w) / 2.0;
                let draw_y = y + (h - draw_h) / 2.0;

                let name = format!("Im{}", xobjects.len() + 1);
                let stream = Stream::new(
                    dictionary! {
                        "Type" => "XObject",
                        "Subtype" => "Image",
                        "Width" => i64::from(image.width_px),
                        "Height" => i64::from(image.height_px),
                        "ColorSpace" => "DeviceRGB",
                        "BitsPerComponent" => 8,
                        "Filter" => "DCTDecode",
                    },
                    image.jpeg,
                )
                .with_compression(false);
                let id = doc.add_object(stream);
                xobjects.set(name.as_bytes().to_vec(), id);

                ops.push(Operation::new("q", vec![]));
                ops.push(Operation::new(
                    "cm",
                    vec![
                        draw_w.into(),
                        0.into(),
                        0.into(),
                        draw_h.into(),
                        draw_x.into(),
                        draw_y.into(),
                    ],
                ));
                ops.push(Operation::new("Do", vec![Object::Name(name.into_bytes())]));
                ops.push(Operation::new("Q", vec![]));
            }
        }
    }
    Ok((ops, xobjects))
}

fn font_object(font: Font) -> Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => font.base_font(),
        "Encoding" => "WinAnsiEncoding",
    }
}

/// Writes the pages, in order, as an A4 PDF.
pub fn render_pdf(pages: &[PageLayout], scale: u32) -> Result<Vec<u8>, ExportError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let regular_id = doc.add_object(font_object(Font::Helvetica));
    let bold_id = doc.add_object(font_object(Font::HelveticaBold));
    let fonts = dictionary! {
        Font::Helvetica.resource_name() => regular_id,
        Font::HelveticaBold.resource_name() => bold_id,
    };

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for layout in pages {
        let (operations, xobjects) = page_content(&mut doc, layout, scale)?;
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
        let resources_id = doc.add_object(dictionary! {
            "Font" => fonts.clone(),
            "XObject" => xobjects,
        });
        let page_id: ObjectId = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => media_box(),
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "MediaBox" => media_box(),
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut buf = Vec::new();
    doc.save_to(&mut buf)?;
    Ok(buf)
}
