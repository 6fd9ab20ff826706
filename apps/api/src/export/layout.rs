//! Fixed two-page layout of the resume, as a list of drawing operations per page.
//!
//! Coordinates are PDF points with the origin at the bottom-left of an A4 page.
//! Columns lay text out top-down; a line that would cross the column's bottom
//! limit is dropped and the column is marked clipped.

use super::font_metrics::{get_metrics, Font, BULLET};
use crate::document::model::ResumeDocument;
use crate::document::theme::{Rgb, Theme, TEXT_DARK, TEXT_MUTED, WHITE};

pub const PAGE_WIDTH: f32 = 595.28;
pub const PAGE_HEIGHT: f32 = 841.89;

const MARGIN: f32 = 28.0;
const SIDEBAR_WIDTH: f32 = PAGE_WIDTH * 2.0 / 5.0;
const PROFILE_IMAGE_SIZE: f32 = 120.0;
const LINE_GAP: f32 = 1.35;

const HEADER_BAND_HEIGHT: f32 = 64.0;
const GRID_COLUMNS: usize = 3;
const GRID_GAP: f32 = 12.0;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Rect {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        color: Rgb,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        width: f32,
        color: Rgb,
    },
    Text {
        x: f32,
        y: f32,
        size: f32,
        font: Font,
        color: Rgb,
        text: String,
    },
    /// Image fitted inside the box, centred, aspect ratio kept.
    Image {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        data_url: String,
    },
}

#[derive(Debug, Clone, Default)]
pub struct PageLayout {
    pub ops: Vec<DrawOp>,
    /// Labels of the columns whose content did not fit.
    pub clipped: Vec<&'static str>,
}

/// A vertical run of text with a fixed left edge and width.
struct Column<'a> {
    label: &'static str,
    x: f32,
    width: f32,
    /// Distance from the top of the page to the next line's top edge.
    cursor: f32,
    bottom: f32,
    clipped: bool,
    ops: &'a mut Vec<DrawOp>,
}

struct TextStyle {
    font: Font,
    size: f32,
    color: Rgb,
    uppercase: bool,
}

impl TextStyle {
    fn new(font: Font, size: f32, color: Rgb) -> Self {
        TextStyle {
            font,
            size,
            color,
            uppercase: false,
        }
    }

    fn upper(mut self) -> Self {
        self.uppercase = true;
        self
    }
}

impl<'a> Column<'a> {
    fn new(label: &'static str, x: f32, width: f32, top: f32, ops: &'a mut Vec<DrawOp>) -> Self {
        Column {
            label,
            x,
            width,
            cursor: top,
            bottom: PAGE_HEIGHT - MARGIN,
            clipped: false,
            ops,
        }
    }

    fn gap(&mut self, pt: f32) {
        self.cursor += pt;
    }

    /// Places one already-wrapped line at `indent`. Returns false if it did not fit.
    fn line(&mut self, text: &str, style: &TextStyle, indent: f32) -> bool {
        let height = style.size * LINE_GAP;
        if self.cursor + height > self.bottom {
            self.clipped = true;
            return false;
        }
        // Baseline sits one font size below the line's top edge.
        let baseline = PAGE_HEIGHT - (self.cursor + style.size);
        self.ops.push(DrawOp::Text {
            x: self.x + indent,
            y: baseline,
            size: style.size,
            font: style.font,
            color: style.color,
            text: text.to_string(),
        });
        self.cursor += height;
        true
    }

    fn paragraph(&mut self, text: &str, style: &TextStyle, indent: f32) {
        let text = if style.uppercase {
            text.to_uppercase()
        } else {
            text.to_string()
        };
        let metrics = get_metrics(style.font);
        for line in metrics.wrap(&text, style.size, self.width - indent) {
            if !self.line(&line, style, indent) {
                break;
            }
        }
    }

    fn maybe(&mut self, text: Option<&String>, style: &TextStyle, indent: f32) {
        if let Some(text) = text {
            self.paragraph(text, style, indent);
        }
    }

    /// Bulleted item; continuation lines hang under the text, not the bullet.
    fn bullet(&mut self, text: &str, style: &TextStyle, indent: f32) {
        let metrics = get_metrics(style.font);
        let marker = format!("{BULLET} ");
        let hang = metrics.width_pt(&marker, style.size);
        let lines = metrics.wrap(text, style.size, self.width - indent - hang);
        for (i, line) in lines.iter().enumerate() {
            let placed = if i == 0 {
                self.line(&format!("{marker}{line}"), style, indent)
            } else {
                self.line(line, style, indent + hang)
            };
            if !placed {
                break;
            }
        }
    }

    fn rule(&mut self, color: Rgb) {
        if self.cursor + 8.0 > self.bottom {
            self.clipped = true;
            return;
        }
        self.cursor += 4.0;
        let y = PAGE_HEIGHT - self.cursor;
        self.ops.push(DrawOp::Line {
            x1: self.x,
            y1: y,
            x2: self.x + self.width,
            y2: y,
            width: 1.0,
            color,
        });
        self.cursor += 6.0;
    }

    fn finish(self, clipped: &mut Vec<&'static str>) {
        if self.clipped {
            clipped.push(self.label);
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Page 1: profile and skills
// ────────────────────────────────────────────────────────────────────────────

pub fn profile_page(doc: &ResumeDocument, theme: Theme) -> PageLayout {
    let mut page = PageLayout::default();
    page.ops.push(DrawOp::Rect {
        x: 0.0,
        y: 0.0,
        w: SIDEBAR_WIDTH,
        h: PAGE_HEIGHT,
        color: theme.background(),
    });

    let mut top = MARGIN;
    if let Some(image) = &doc.personal.profile_image {
        page.ops.push(DrawOp::Image {
            x: (SIDEBAR_WIDTH - PROFILE_IMAGE_SIZE) / 2.0,
            y: PAGE_HEIGHT - top - PROFILE_IMAGE_SIZE,
            w: PROFILE_IMAGE_SIZE,
            h: PROFILE_IMAGE_SIZE,
            data_url: image.clone(),
        });
        top += PROFILE_IMAGE_SIZE + 14.0;
    }

    let mut clipped = Vec::new();
    {
        let mut side = Column::new(
            "sidebar",
            MARGIN - 8.0,
            SIDEBAR_WIDTH - 2.0 * (MARGIN - 8.0),
            top,
            &mut page.ops,
        );
        sidebar(&mut side, doc, theme);
        side.finish(&mut clipped);
    }
    {
        let x = SIDEBAR_WIDTH + 20.0;
        let mut main = Column::new("main", x, PAGE_WIDTH - x - 24.0, MARGIN, &mut page.ops);
        main_column(&mut main, doc, theme);
        main.finish(&mut clipped);
    }
    page.clipped = clipped;
    page
}

fn sidebar(col: &mut Column<'_>, doc: &ResumeDocument, theme: Theme) {
    let name = TextStyle::new(Font::HelveticaBold, 16.0, WHITE).upper();
    let subtitle = TextStyle::new(Font::HelveticaBold, 9.5, WHITE).upper();
    let heading = TextStyle::new(Font::HelveticaBold, 10.0, theme.accent()).upper();
    let body = TextStyle::new(Font::Helvetica, 8.5, WHITE);

    col.paragraph(&doc.personal.full_name, &name, 0.0);
    col.maybe(doc.personal.course.as_ref(), &subtitle, 0.0);
    col.maybe(doc.personal.major.as_ref(), &subtitle, 0.0);
    col.gap(10.0);

    let contact = &doc.contact;
    col.paragraph("Contact Information", &heading, 0.0);
    for value in [&contact.phone, &contact.email, &contact.linkedin]
        .into_iter()
        .flatten()
    {
        col.paragraph(value, &body, 6.0);
    }
    col.gap(8.0);

    col.paragraph("Portfolio", &heading, 0.0);
    for value in [&contact.portfolio, &contact.github].into_iter().flatten() {
        col.paragraph(value, &body, 6.0);
    }
    col.gap(8.0);

    for (title, items) in [
        ("Technical Skills", &doc.technical_skills),
        ("Programming Languages, Tools & Frameworks", &doc.platforms),
        ("Core Work Skills", &doc.core_skills),
    ] {
        col.paragraph(title, &heading, 0.0);
        for item in items {
            col.bullet(item, &body, 6.0);
        }
        col.gap(8.0);
    }
}

fn main_column(col: &mut Column<'_>, doc: &ResumeDocument, theme: Theme) {
    let heading = TextStyle::new(Font::HelveticaBold, 11.0, TEXT_DARK).upper();
    let entry_title = TextStyle::new(Font::HelveticaBold, 9.0, TEXT_DARK).upper();
    let meta = TextStyle::new(Font::Helvetica, 8.5, TEXT_DARK);
    let muted = TextStyle::new(Font::Helvetica, 8.5, TEXT_MUTED);
    let body = TextStyle::new(Font::Helvetica, 8.5, TEXT_DARK);
    let accent = theme.accent();

    col.paragraph("Profile Summary", &heading, 0.0);
    col.maybe(doc.summary.as_ref(), &body, 4.0);
    col.rule(accent);

    let edu = &doc.education;
    col.paragraph("Education and Certifications", &heading, 0.0);
    col.maybe(edu.degree_line.as_ref(), &entry_title, 4.0);
    col.maybe(edu.school_line.as_ref(), &meta, 4.0);
    for cert in &edu.certificates {
        col.bullet(cert, &body, 8.0);
    }
    col.rule(accent);

    col.paragraph("Relevant Experience", &heading, 0.0);
    if let Some(exp) = &doc.experience {
        col.maybe(exp.title_line.as_ref(), &entry_title, 4.0);
        col.maybe(exp.company_line.as_ref(), &meta, 4.0);
        col.maybe(exp.address.as_ref(), &muted, 4.0);
        col.maybe(exp.description.as_ref(), &body, 8.0);
        for detail in &exp.details {
            col.bullet(detail, &body, 8.0);
        }
    }
    col.rule(accent);

    col.paragraph("Projects", &heading, 0.0);
    for (i, project) in doc.projects.iter().enumerate() {
        if i > 0 {
            col.gap(4.0);
        }
        col.maybe(project.title.as_ref(), &entry_title, 4.0);
        col.maybe(project.meta_line.as_ref(), &meta, 4.0);
        col.maybe(project.platforms_line.as_ref(), &muted, 8.0);
        col.maybe(project.description.as_ref(), &body, 8.0);
        for detail in &project.details {
            col.bullet(detail, &body, 8.0);
        }
    }
    col.rule(accent);

    col.paragraph("Activities", &heading, 0.0);
    if let Some(activity) = &doc.activity {
        col.maybe(activity.title_line.as_ref(), &entry_title, 4.0);
        col.maybe(activity.meta_line.as_ref(), &meta, 4.0);
        for detail in &activity.details {
            col.bullet(detail, &body, 8.0);
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Page 2: project screenshots
// ────────────────────────────────────────────────────────────────────────────

pub fn screenshots_page(doc: &ResumeDocument, theme: Theme) -> PageLayout {
    let mut page = PageLayout::default();
    page.ops.push(DrawOp::Rect {
        x: 0.0,
        y: PAGE_HEIGHT - HEADER_BAND_HEIGHT,
        w: PAGE_WIDTH,
        h: HEADER_BAND_HEIGHT,
        color: theme.background(),
    });

    let name_style = TextStyle::new(Font::HelveticaBold, 18.0, WHITE);
    let mut clipped = Vec::new();
    {
        let mut header = Column::new(
            "header",
            MARGIN,
            PAGE_WIDTH - 2.0 * MARGIN,
            (HEADER_BAND_HEIGHT - 18.0) / 2.0,
            &mut page.ops,
        );
        header.bottom = HEADER_BAND_HEIGHT;
        let name = truncate_to_width(&doc.personal.full_name, &name_style, header.width);
        header.line(&name, &name_style, 0.0);
        header.finish(&mut clipped);
    }

    let cell_w = (PAGE_WIDTH - 2.0 * MARGIN - GRID_GAP * (GRID_COLUMNS as f32 - 1.0))
        / GRID_COLUMNS as f32;
    let title_style = TextStyle::new(Font::HelveticaBold, 9.0, TEXT_DARK);
    let title_h = 2.0 * title_style.size * LINE_GAP;
    let grid_top = HEADER_BAND_HEIGHT + 18.0;

    // Rows shrink so every screenshot lands on the page.
    let rows = doc.screenshots.len().div_ceil(GRID_COLUMNS).max(1);
    let max_image_h = cell_w * 0.75;
    let available_row_h = (PAGE_HEIGHT - MARGIN - grid_top) / rows as f32;
    let image_h = max_image_h.min(available_row_h - 4.0 - title_h - GRID_GAP);
    let row_h = image_h + 4.0 + title_h + GRID_GAP;

    let mut overflow = false;
    for (i, shot) in doc.screenshots.iter().enumerate() {
        let row = (i / GRID_COLUMNS) as f32;
        let col_idx = (i % GRID_COLUMNS) as f32;
        let top = grid_top + row * row_h;
        let x = MARGIN + col_idx * (cell_w + GRID_GAP);
        page.ops.push(DrawOp::Image {
            x,
            y: PAGE_HEIGHT - top - image_h,
            w: cell_w,
            h: image_h,
            data_url: shot.image.clone(),
        });

        if let Some(title) = &shot.title {
            let caption_top = top + image_h + 4.0;
            let mut caption =
                Column::new("screenshots", x, cell_w, caption_top, &mut page.ops);
            caption.bottom = caption_top + title_h;
            caption.paragraph(title, &title_style, 0.0);
            if caption.clipped {
                overflow = true;
            }
        }
    }
    if overflow {
        clipped.push("screenshots");
    }
    page.clipped = clipped;
    page
}

fn truncate_to_width(text: &str, style: &TextStyle, width: f32) -> String {
    let metrics = get_metrics(style.font);
    if metrics.width_pt(text, style.size) <= width {
        return text.to_string();
    }
    let mut out = String::new();
    for c in text.chars() {
        out.push(c);
        if metrics.width_pt(&format!("{out}..."), style.size) > width {
            out.pop();
            break;
        }
    }
    format!("{out}...")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::model::{ProjectBlock, ScreenshotBlock};
    use crate::wizard::validation::MAX_SCREENSHOTS;

    fn texts(page: &PageLayout) -> Vec<&str> {
        page.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_profile_page_draws_every_section_heading() {
        let page = profile_page(&ResumeDocument::default(), Theme::GreenYellow);
        let texts = texts(&page);
        for heading in [
            "CONTACT INFORMATION",
            "PORTFOLIO",
            "TECHNICAL SKILLS",
            "CORE WORK SKILLS",
            "PROFILE SUMMARY",
            "EDUCATION AND CERTIFICATIONS",
            "RELEVANT EXPERIENCE",
            "PROJECTS",
            "ACTIVITIES",
        ] {
            assert!(texts.contains(&heading), "missing {heading}");
        }
        assert!(page.clipped.is_empty());
    }

    #[test]
    fn test_sidebar_uses_theme_background() {
        let page = profile_page(&ResumeDocument::default(), Theme::BlueOrange);
        assert!(matches!(
            page.ops[0],
            DrawOp::Rect { color, .. } if color == Theme::BlueOrange.background()
        ));
    }

    #[test]
    fn test_overflowing_main_column_is_clipped() {
        let mut doc = ResumeDocument::default();
        doc.projects = (0..2)
            .map(|_| ProjectBlock {
                description: Some("word ".repeat(2000)),
                ..Default::default()
            })
            .collect();
        let page = profile_page(&doc, Theme::GreenYellow);
        assert!(page.clipped.contains(&"main"));
        for op in &page.ops {
            if let DrawOp::Text { y, .. } = op {
                assert!(*y >= MARGIN - 1.0, "text below bottom margin at {y}");
            }
        }
    }

    #[test]
    fn test_screenshot_grid_is_three_columns() {
        let mut doc = ResumeDocument::default();
        doc.screenshots = (0..4)
            .map(|i| ScreenshotBlock {
                title: Some(format!("Shot {i}")),
                image: "data:image/jpeg;base64,AAAA".to_string(),
            })
            .collect();
        let page = screenshots_page(&doc, Theme::GreenYellow);
        let image_xs: Vec<f32> = page
            .ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Image { x, .. } => Some(*x),
                _ => None,
            })
            .collect();
        assert_eq!(image_xs.len(), 4);
        assert_eq!(image_xs[0], image_xs[3]);
        assert!(image_xs[0] < image_xs[1] && image_xs[1] < image_xs[2]);
    }

    #[test]
    fn test_full_screenshot_set_fits_on_the_page() {
        let mut doc = ResumeDocument::default();
        doc.screenshots = (0..MAX_SCREENSHOTS)
            .map(|i| ScreenshotBlock {
                title: Some(format!("Screen {i}")),
                image: "data:image/jpeg;base64,AAAA".to_string(),
            })
            .collect();
        let page = screenshots_page(&doc, Theme::GreenYellow);
        let boxes: Vec<(f32, f32)> = page
            .ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Image { y, h, .. } => Some((*y, *h)),
                _ => None,
            })
            .collect();
        assert_eq!(boxes.len(), MAX_SCREENSHOTS);
        assert!(page.clipped.is_empty(), "clipped: {:?}", page.clipped);
        for (y, h) in boxes {
            assert!(h > 0.0);
            assert!(y >= MARGIN, "image below bottom margin at {y}");
        }
    }

    #[test]
    fn test_long_name_is_truncated_in_header() {
        let style = TextStyle::new(Font::HelveticaBold, 18.0, WHITE);
        let out = truncate_to_width(&"W".repeat(200), &style, 100.0);
        assert!(out.ends_with("..."));
        assert!(get_metrics(Font::HelveticaBold).width_pt(&out, 18.0) <= 100.0);
    }
}
