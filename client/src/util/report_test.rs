use chrono::TimeZone;

use super::*;

fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 9, 30, 0).single().expect("valid timestamp")
}

// =============================================================
// Naming and header text
// =============================================================

#[test]
fn file_name_encodes_generation_date() {
    let report = AnalysisReport::new("text", at(2026, 3, 7));
    assert_eq!(report.file_name(), "DermAI-Report-2026-03-07.pdf");
}

#[test]
fn timestamp_line_is_human_readable() {
    let report = AnalysisReport::new("text", at(2026, 3, 7));
    assert_eq!(report.timestamp_line(), "Generated: March 7, 2026 09:30 UTC");
}

#[test]
fn report_body_is_the_text_the_result_panel_shows() {
    use crate::state::analyze::{AnalyzeController, PreviewHandle, ResultView, SelectedFile};

    let mut controller = AnalyzeController::default();
    controller
        .select_file(SelectedFile::new("a.png", "image/png", vec![1, 2, 3]), PreviewHandle::new("blob:a"))
        .expect("select");
    let submission = controller.begin_submit().expect("submission");
    controller.complete(submission.id, Ok("## Findings\n**Benign** pattern.".to_owned()), at(2026, 1, 1));

    let ResultView::Success(shown) = controller.result_view() else {
        panic!("expected a successful result");
    };
    let report = AnalysisReport::new(shown.clone(), at(2026, 1, 1));
    assert_eq!(report.body(), shown);
    assert_eq!(report.body(), "Findings\n\nBenign pattern.");
}

#[test]
fn wrapped_line_fits_text_width() {
    #[allow(clippy::cast_precision_loss)]
    let line_mm = WRAP_COLUMNS as f32 * AVG_GLYPH_EM * BODY_FONT_PT * PT_TO_MM;
    assert!(line_mm <= TEXT_WIDTH_MM, "{line_mm} mm exceeds {TEXT_WIDTH_MM} mm");
}

// =============================================================
// wrap_text
// =============================================================

#[test]
fn wrap_keeps_short_lines() {
    assert_eq!(wrap_text("short line", 20), vec!["short line"]);
}

#[test]
fn wrap_breaks_on_word_boundaries() {
    assert_eq!(wrap_text("alpha beta gamma delta", 11), vec!["alpha beta", "gamma delta"]);
}

#[test]
fn wrap_keeps_blank_lines() {
    assert_eq!(wrap_text("one\n\ntwo", 10), vec!["one", "", "two"]);
}

#[test]
fn wrap_splits_overlong_words() {
    assert_eq!(wrap_text("ab abcdefgh", 4), vec!["ab", "abcd", "efgh"]);
}

#[test]
fn wrap_never_exceeds_column_limit() {
    let text = "Asymmetry, border irregularity, color variation, diameter and evolution are the ABCDE signs.";
    for line in wrap_text(text, 16) {
        assert!(line.chars().count() <= 16, "line too long: {line:?}");
    }
}

// =============================================================
// Pagination
// =============================================================

#[test]
fn empty_body_still_has_one_page() {
    let layout = AnalysisReport::new("", at(2026, 1, 1)).layout();
    assert_eq!(layout.pages.len(), 1);
    assert!(layout.pages[0].is_empty());
}

#[test]
fn long_body_spills_onto_continuation_pages() {
    let body = (0..FIRST_PAGE_LINES + PAGE_LINES + 1).map(|i| format!("line {i}")).collect::<Vec<_>>().join("\n");
    let layout = AnalysisReport::new(body, at(2026, 1, 1)).layout();
    assert_eq!(layout.pages.len(), 3);
    assert_eq!(layout.pages[0].len(), FIRST_PAGE_LINES);
    assert_eq!(layout.pages[1].len(), PAGE_LINES);
    assert_eq!(layout.pages[2], vec![format!("line {}", FIRST_PAGE_LINES + PAGE_LINES)]);
}

#[test]
fn pdf_text_maps_typographic_characters() {
    assert_eq!(pdf_text("\u{201C}mild\u{201D} \u{2013} it\u{2019}s"), "\"mild\" - it's");
    assert_eq!(pdf_text("caf\u{e9} \u{4e2d}"), "caf\u{e9} ?");
}

// =============================================================
// Rendering
// =============================================================

#[test]
fn render_pdf_produces_pdf_bytes() {
    let report = AnalysisReport::new("Erythematous macule, ABCDE: benign pattern.", at(2026, 1, 1));
    let bytes = report.render_pdf().expect("render");
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn render_pdf_handles_multi_page_bodies() {
    let body = "word ".repeat(WRAP_COLUMNS * 60);
    let report = AnalysisReport::new(body, at(2026, 1, 1));
    assert!(report.layout().pages.len() > 1);
    assert!(report.render_pdf().is_ok());
}
