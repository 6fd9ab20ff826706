//! PDF export of the assembled resume, plus the finalize step that ends a session.

pub mod font_metrics;
pub mod handlers;
pub mod layout;
pub mod pdf;

use thiserror::Error;
use tracing::{info, warn};

use crate::document::{ResumeDocument, Theme};
use crate::media::MediaError;
use crate::store::{SessionStore, StoreError};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image error: {0}")]
    Media(#[from] MediaError),
}

#[derive(Debug, Clone, Copy)]
pub struct ExportOptions {
    pub theme: Theme,
    /// Raster pixels per PDF point for embedded images.
    pub scale: u32,
}

#[derive(Debug, Clone)]
pub struct ExportedPdf {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// `<lastname>.pdf`, or `Resume.pdf` when there is no last name.
pub fn export_filename(doc: &ResumeDocument) -> String {
    let stem: String = doc
        .personal
        .lastname
        .as_deref()
        .unwrap_or("")
        .chars()
        .filter(|c| !matches!(c, '/' | '\\' | '"' | '\r' | '\n'))
        .collect();
    let stem = stem.trim();
    if stem.is_empty() {
        "Resume.pdf".to_string()
    } else {
        format!("{stem}.pdf")
    }
}

/// Renders both pages to a PDF. Does not touch the store.
pub fn export_pdf(doc: &ResumeDocument, opts: &ExportOptions) -> Result<ExportedPdf, ExportError> {
    let pages = [
        layout::profile_page(doc, opts.theme),
        layout::screenshots_page(doc, opts.theme),
    ];
    for page in &pages {
        for column in &page.clipped {
            warn!(column, "content overflowed the page and was clipped");
        }
    }
    let bytes = pdf::render_pdf(&pages, opts.scale)?;
    let filename = export_filename(doc);
    info!(filename = %filename, bytes = bytes.len(), "resume exported");
    Ok(ExportedPdf { filename, bytes })
}

/// Clears every record of the session so the next visit starts fresh.
pub async fn finalize(store: &SessionStore) -> Result<(), StoreError> {
    store.clear().await?;
    info!(session = %store.session_id(), "session finalized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{assemble, load_source};
    use crate::media::data_url;
    use crate::media::normalize::{encode_jpeg, flatten_onto_white};
    use crate::wizard::forms::test_support::session_store;
    use crate::wizard::forms::{
        submit, ActivitiesForm, CertificatesForm, CoreSkillsForm, ExperienceForm,
        PlatformsForm, ScreenshotsForm, TechnicalSkillsForm,
    };
    use crate::wizard::records::{PersonalDetails, ProfileImage};
    use image::{DynamicImage, Rgba, RgbaImage};
    use lopdf::Document;

    fn opts() -> ExportOptions {
        ExportOptions {
            theme: Theme::GreenYellow,
            scale: 1,
        }
    }

    fn tiny_jpeg_url() -> String {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(40, 30, Rgba([200, 10, 10, 255])));
        data_url::encode_jpeg(&encode_jpeg(&flatten_onto_white(&img), 80).unwrap())
    }

    #[test]
    fn test_filename_from_lastname() {
        let mut doc = ResumeDocument::default();
        assert_eq!(export_filename(&doc), "Resume.pdf");
        doc.personal.lastname = Some("Cruz".to_string());
        assert_eq!(export_filename(&doc), "Cruz.pdf");
    }

    #[test]
    fn test_empty_document_exports_two_a4_pages() {
        let pdf = export_pdf(&ResumeDocument::default(), &opts()).unwrap();
        assert_eq!(pdf.filename, "Resume.pdf");
        assert!(pdf.bytes.starts_with(b"%PDF-"));

        let parsed = Document::load_mem(&pdf.bytes).unwrap();
        let pages = parsed.get_pages();
        assert_eq!(pages.len(), 2);

        let first = pages.values().next().copied().unwrap();
        let page = parsed.get_dictionary(first).unwrap();
        let media_box = page.get(b"MediaBox").unwrap().as_array().unwrap();
        let width = media_box[2].as_float().unwrap();
        let height = media_box[3].as_float().unwrap();
        assert!((width - 595.28).abs() < 0.01);
        assert!((height - 841.89).abs() < 0.01);
    }

    #[test]
    fn test_images_embed_and_broken_images_are_skipped() {
        let mut doc = ResumeDocument::default();
        doc.personal.profile_image = Some(tiny_jpeg_url());
        doc.screenshots = vec![
            crate::document::model::ScreenshotBlock {
                title: Some("Works".to_string()),
                image: tiny_jpeg_url(),
            },
            crate::document::model::ScreenshotBlock {
                title: Some("Broken".to_string()),
                image: "data:image/png;base64,AAAA".to_string(),
            },
        ];
        let pdf = export_pdf(&doc, &opts()).unwrap();
        let parsed = Document::load_mem(&pdf.bytes).unwrap();
        assert_eq!(parsed.get_pages().len(), 2);

        let images = parsed
            .objects
            .values()
            .filter_map(|o| o.as_stream().ok())
            .filter(|s| {
                s.dict
                    .get(b"Subtype")
                    .and_then(|v| v.as_name())
                    .map(|n| n == b"Image")
                    .unwrap_or(false)
            })
            .count();
        assert_eq!(images, 2);
    }

    #[tokio::test]
    async fn test_placeholder_session_exports_then_finalizes() {
        let store = session_store();
        store
            .save(&PersonalDetails {
                firstname: "Ana".to_string(),
                middlename: "B".to_string(),
                lastname: "Cruz".to_string(),
                suffix: " ".to_string(),
                email: "ana@x.com".to_string(),
                phone_number: "09171234567".to_string(),
            })
            .await
            .unwrap();
        store.save(&ProfileImage(tiny_jpeg_url())).await.unwrap();
        submit(&store, &TechnicalSkillsForm::default()).await.unwrap();
        submit(&store, &PlatformsForm::default()).await.unwrap();
        submit(&store, &CoreSkillsForm::default()).await.unwrap();
        submit(&store, &ActivitiesForm::default()).await.unwrap();
        submit(&store, &CertificatesForm::default()).await.unwrap();
        submit(&store, &ExperienceForm::default()).await.unwrap();
        submit(&store, &ScreenshotsForm::default()).await.unwrap();

        let doc = assemble(&load_source(&store).await);
        let pdf = export_pdf(&doc, &opts()).unwrap();
        assert_eq!(pdf.filename, "Cruz.pdf");
        assert_eq!(Document::load_mem(&pdf.bytes).unwrap().get_pages().len(), 2);

        finalize(&store).await.unwrap();
        assert!(store.keys().await.unwrap().is_empty());
    }
}
