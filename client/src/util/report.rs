//! PDF export of an analysis result.
//!
//! SYSTEM CONTEXT
//! ==============
//! The result panel's download button hands the same stripped text it
//! displays to `AnalysisReport`, which lays it out on A4 pages and renders a
//! PDF with `printpdf`. In the browser the bytes are offered as a download.
//!
//! DESIGN
//! ======
//! Layout (wrapping and pagination) is computed separately from rendering so
//! page contents can be checked without parsing PDF output.

#[cfg(test)]
#[path = "report_test.rs"]
mod report_test;

use chrono::{DateTime, Utc};
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfLayerReference};

pub const REPORT_TITLE: &str = "DermAI Analysis Report";
pub const REPORT_SUBTITLE: &str = "AI-generated educational skin analysis";
pub const REPORT_DISCLAIMER: &str =
    "Educational use only. This report is not a medical diagnosis. Consult a dermatologist about any concern.";

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 20.0;
const LINE_HEIGHT_MM: f32 = 6.0;
const FOOTER_Y_MM: f32 = 12.0;
/// First body line on page one, below the title block and timestamp.
const FIRST_PAGE_BODY_TOP_MM: f32 = 245.0;
/// First body line on continuation pages.
const BODY_TOP_MM: f32 = PAGE_HEIGHT_MM - MARGIN_MM;

const BODY_FONT_PT: f32 = 11.0;
const PT_TO_MM: f32 = 25.4 / 72.0;
/// Average Helvetica advance for prose, in ems.
const AVG_GLYPH_EM: f32 = 0.5;
const TEXT_WIDTH_MM: f32 = PAGE_WIDTH_MM - 2.0 * MARGIN_MM;

/// Characters per body line; about 155 mm of average 11pt Helvetica, inside
/// the 170 mm text width.
pub const WRAP_COLUMNS: usize = 80;
/// Body lines on page one; the lowest baseline stays above 24 mm, clear of the footer.
pub const FIRST_PAGE_LINES: usize = 37;
/// Body lines on continuation pages, same 24 mm floor.
pub const PAGE_LINES: usize = 43;

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("pdf rendering failed: {0}")]
    Pdf(String),
    #[error("download failed: {0}")]
    Download(String),
}

/// Body lines assigned to each page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportLayout {
    pub pages: Vec<Vec<String>>,
}

/// An analysis result prepared for export.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnalysisReport {
    body: String,
    generated_at: DateTime<Utc>,
}

impl AnalysisReport {
    /// Build a report from text already stripped for display.
    #[must_use]
    pub fn new(plain_text: impl Into<String>, generated_at: DateTime<Utc>) -> Self {
        Self { body: plain_text.into(), generated_at }
    }

    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// `DermAI-Report-YYYY-MM-DD.pdf`
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("DermAI-Report-{}.pdf", self.generated_at.format("%Y-%m-%d"))
    }

    #[must_use]
    pub fn timestamp_line(&self) -> String {
        format!("Generated: {}", self.generated_at.format("%B %-d, %Y %H:%M UTC"))
    }

    /// Wrap the body and split it across pages. Always at least one page.
    #[must_use]
    pub fn layout(&self) -> ReportLayout {
        let lines = wrap_text(&self.body, WRAP_COLUMNS);
        let mut pages = Vec::new();
        let mut rest = lines.as_slice();

        let first = rest.len().min(FIRST_PAGE_LINES);
        pages.push(rest[..first].to_vec());
        rest = &rest[first..];

        while !rest.is_empty() {
            let take = rest.len().min(PAGE_LINES);
            pages.push(rest[..take].to_vec());
            rest = &rest[take..];
        }

        ReportLayout { pages }
    }

    /// Render the laid-out report to PDF bytes.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::Pdf` if a font cannot be registered or the
    /// document cannot be serialized.
    pub fn render_pdf(&self) -> Result<Vec<u8>, ReportError> {
        let layout = self.layout();
        let page_count = layout.pages.len();

        let (doc, first_page, first_layer) =
            PdfDocument::new(REPORT_TITLE, Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
        let regular = doc.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_err)?;
        let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold).map_err(pdf_err)?;

        for (index, lines) in layout.pages.iter().enumerate() {
            let layer = if index == 0 {
                doc.get_page(first_page).get_layer(first_layer)
            } else {
                let (page, layer) = doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
                doc.get_page(page).get_layer(layer)
            };

            let mut y = if index == 0 {
                self.write_title_block(&layer, &regular, &bold);
                FIRST_PAGE_BODY_TOP_MM
            } else {
                BODY_TOP_MM
            };

            for line in lines {
                if !line.is_empty() {
                    layer.use_text(pdf_text(line), BODY_FONT_PT, Mm(MARGIN_MM), Mm(y), &regular);
                }
                y -= LINE_HEIGHT_MM;
            }

            write_footer(&layer, &regular, index + 1, page_count);
        }

        doc.save_to_bytes().map_err(pdf_err)
    }

    fn write_title_block(&self, layer: &PdfLayerReference, regular: &IndirectFontRef, bold: &IndirectFontRef) {
        let top = PAGE_HEIGHT_MM - MARGIN_MM;
        layer.use_text(REPORT_TITLE, 20.0, Mm(MARGIN_MM), Mm(top), bold);
        layer.use_text(REPORT_SUBTITLE, 11.0, Mm(MARGIN_MM), Mm(top - 9.0), regular);
        layer.use_text(self.timestamp_line(), 10.0, Mm(MARGIN_MM), Mm(top - 17.0), regular);
    }
}

fn write_footer(layer: &PdfLayerReference, font: &IndirectFontRef, page: usize, page_count: usize) {
    layer.use_text(REPORT_DISCLAIMER, 8.0, Mm(MARGIN_MM), Mm(FOOTER_Y_MM), font);
    layer.use_text(
        format!("Page {page} of {page_count}"),
        8.0,
        Mm(PAGE_WIDTH_MM - MARGIN_MM - 20.0),
        Mm(FOOTER_Y_MM - 5.0),
        font,
    );
}

fn pdf_err(e: impl std::fmt::Display) -> ReportError {
    ReportError::Pdf(e.to_string())
}

/// Builtin PDF fonts only cover Latin-1; map common typographic characters
/// from model output to ASCII and replace anything else outside Latin-1.
fn pdf_text(line: &str) -> String {
    line.chars()
        .map(|c| match c {
            '\u{2018}' | '\u{2019}' => '\'',
            '\u{201C}' | '\u{201D}' => '"',
            '\u{2013}' | '\u{2014}' | '\u{2022}' | '\u{25E6}' => '-',
            c if u32::from(c) <= 0xFF => c,
            _ => '?',
        })
        .collect()
}

/// Greedy word wrap by character count. Blank lines are kept; words longer
/// than `columns` are split.
#[must_use]
pub fn wrap_text(text: &str, columns: usize) -> Vec<String> {
    let columns = columns.max(1);
    let mut lines = Vec::new();

    for source in text.lines() {
        let mut current = String::new();
        let mut current_len = 0;

        for word in source.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();

            while word.len() > columns {
                if current_len > 0 {
                    lines.push(std::mem::take(&mut current));
                    current_len = 0;
                }
                let rest = word.split_off(columns);
                lines.push(word.into_iter().collect());
                word = rest;
            }

            let needed = if current_len == 0 { word.len() } else { current_len + 1 + word.len() };
            if needed > columns {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            if current_len > 0 {
                current.push(' ');
                current_len += 1;
            }
            current.extend(word.iter());
            current_len += word.len();
        }

        lines.push(current);
    }

    lines
}

/// Render `report` and hand it to the browser as a file download.
///
/// # Errors
///
/// Returns an error if rendering fails or the download cannot be started.
#[cfg(feature = "hydrate")]
pub fn download_report(report: &AnalysisReport) -> Result<(), ReportError> {
    let bytes = report.render_pdf()?;
    crate::util::browser::download_bytes(&bytes, "application/pdf", &report.file_name()).map_err(ReportError::Download)
}
