use chrono::TimeZone;

use super::*;

fn png(name: &str) -> SelectedFile {
    SelectedFile::new(name, "image/png", vec![0x89, b'P', b'N', b'G'])
}

fn preview(name: &str) -> PreviewHandle {
    PreviewHandle::new(format!("blob:{name}"))
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 5, 4, 14, 0, 0).single().expect("valid timestamp")
}

fn ready(name: &str) -> AnalyzeController {
    let mut controller = AnalyzeController::default();
    controller.select_file(png(name), preview(name)).expect("valid file");
    controller
}

// =============================================================
// Image validation
// =============================================================

#[test]
fn image_kind_accepts_permitted_types() {
    assert_eq!(ImageKind::from_content_type("image/png"), Some(ImageKind::Png));
    assert_eq!(ImageKind::from_content_type("IMAGE/JPEG"), Some(ImageKind::Jpeg));
    assert_eq!(ImageKind::from_content_type("image/jpg"), Some(ImageKind::Jpeg));
    assert_eq!(ImageKind::from_content_type("image/webp; q=1"), Some(ImageKind::Webp));
}

#[test]
fn image_kind_rejects_other_types() {
    assert_eq!(ImageKind::from_content_type("image/gif"), None);
    assert_eq!(ImageKind::from_content_type("application/pdf"), None);
    assert_eq!(ImageKind::from_content_type(""), None);
}

#[test]
fn file_at_size_limit_is_accepted() {
    let file = SelectedFile::new("big.jpg", "image/jpeg", vec![0; MAX_UPLOAD_BYTES]);
    assert_eq!(file.validate(), Ok(ImageKind::Jpeg));
}

#[test]
fn file_over_size_limit_is_rejected() {
    let file = SelectedFile::new("huge.jpg", "image/jpeg", vec![0; MAX_UPLOAD_BYTES + 1]);
    let err = file.validate().unwrap_err();
    assert_eq!(err, AnalyzeError::TooLarge { size: MAX_UPLOAD_BYTES + 1, limit: MAX_UPLOAD_BYTES });
    assert_eq!(err.to_string(), "Image is too large. The maximum size is 5 MB.");
}

// =============================================================
// select_file / clear_file
// =============================================================

#[test]
fn starts_idle_with_nothing_to_submit() {
    let controller = AnalyzeController::default();
    assert_eq!(controller.phase(), Phase::Idle);
    assert!(!controller.can_submit());
    assert_eq!(controller.result_view(), ResultView::Hidden);
}

#[test]
fn select_file_makes_controller_ready() {
    let controller = ready("a.png");
    assert_eq!(controller.phase(), Phase::Ready);
    assert!(controller.can_submit());
    assert_eq!(controller.pending().map(PendingUpload::preview_url), Some("blob:a.png"));
}

#[test]
fn only_latest_selection_is_retained() {
    let mut controller = ready("a.png");
    controller.select_file(png("b.png"), preview("b.png")).expect("valid");
    controller.select_file(png("c.png"), preview("c.png")).expect("valid");
    assert_eq!(controller.pending().map(|p| p.file.name.as_str()), Some("c.png"));
}

#[test]
fn select_file_clears_previous_result() {
    let mut controller = ready("a.png");
    let submission = controller.begin_submit().expect("submission");
    controller.complete(submission.id, Ok("done".to_owned()), now());
    assert_eq!(controller.phase(), Phase::Succeeded);

    controller.select_file(png("b.png"), preview("b.png")).expect("valid");
    assert_eq!(controller.phase(), Phase::Ready);
    assert_eq!(controller.result_view(), ResultView::Hidden);
}

#[test]
fn select_file_clears_previous_error() {
    let mut controller = AnalyzeController::default();
    assert!(controller.begin_submit().is_none());
    assert_eq!(controller.phase(), Phase::Failed);

    controller.select_file(png("a.png"), preview("a.png")).expect("valid");
    assert_eq!(controller.request(), &RequestState::Idle);
}

#[test]
fn rejected_file_leaves_no_pending_upload() {
    let mut controller = ready("a.png");
    let gif = SelectedFile::new("anim.gif", "image/gif", vec![1]);

    let err = controller.select_file(gif, preview("anim.gif")).unwrap_err();
    assert_eq!(err, AnalyzeError::UnsupportedType("image/gif".to_owned()));
    assert!(controller.pending().is_none());
    assert!(!controller.can_submit());
    assert_eq!(controller.result_view(), ResultView::Error(err.to_string()));
}

#[test]
fn clear_file_keeps_result_display() {
    let mut controller = ready("a.png");
    let submission = controller.begin_submit().expect("submission");
    controller.complete(submission.id, Ok("**Benign**".to_owned()), now());

    controller.clear_file();
    assert!(controller.pending().is_none());
    assert_eq!(controller.result_view(), ResultView::Success("Benign".to_owned()));
}

// =============================================================
// Submission cycle
// =============================================================

#[test]
fn submit_without_file_fails_with_no_image_message() {
    let mut controller = AnalyzeController::default();
    assert!(controller.begin_submit().is_none());
    assert_eq!(controller.request(), &RequestState::Failed(NO_IMAGE_MESSAGE.to_owned()));
    assert!(!controller.is_submitting());
}

#[test]
fn begin_submit_enters_loading_and_disables_submit() {
    let mut controller = ready("a.png");
    let submission = controller.begin_submit().expect("submission");

    assert_eq!(submission.file.name, "a.png");
    assert_eq!(controller.phase(), Phase::Submitting);
    assert_eq!(controller.result_view(), ResultView::Loading);
    assert!(!controller.can_submit());
}

#[test]
fn second_submit_while_in_flight_is_noop() {
    let mut controller = ready("a.png");
    let first = controller.begin_submit().expect("submission");

    assert!(controller.begin_submit().is_none());
    assert_eq!(controller.request(), &RequestState::Loading);
    assert!(controller.complete(first.id, Ok("ok".to_owned()), now()));
}

#[test]
fn success_sets_text_and_prepends_history() {
    let mut controller = ready("first.png");
    let submission = controller.begin_submit().expect("submission");
    assert!(controller.complete(
        submission.id,
        Ok("Erythematous macule, ABCDE: benign pattern.".to_owned()),
        now()
    ));

    assert_eq!(
        controller.request(),
        &RequestState::Succeeded("Erythematous macule, ABCDE: benign pattern.".to_owned())
    );
    assert!(!controller.is_submitting());
    assert_eq!(
        controller.history(),
        &[HistoryEntry { title: "Skin analysis: first.png".to_owned(), created_at: now() }]
    );

    controller.select_file(png("second.png"), preview("second.png")).expect("valid");
    let submission = controller.begin_submit().expect("submission");
    controller.complete(submission.id, Ok("again".to_owned()), now());
    assert_eq!(controller.history()[0].title, "Skin analysis: second.png");
    assert_eq!(controller.history().len(), 2);
}

#[test]
fn server_error_sets_failed_without_history() {
    let mut controller = ready("a.png");
    let submission = controller.begin_submit().expect("submission");
    controller.complete(submission.id, Err(AnalyzeError::Server("Unsupported image".to_owned())), now());

    assert_eq!(controller.request(), &RequestState::Failed("Unsupported image".to_owned()));
    assert!(controller.history().is_empty());
}

#[test]
fn transport_failure_uses_generic_message() {
    let mut controller = ready("a.png");
    let submission = controller.begin_submit().expect("submission");
    controller.complete(submission.id, Err(AnalyzeError::Transport("connection refused".to_owned())), now());

    assert_eq!(controller.request(), &RequestState::Failed(GENERIC_FAILURE_MESSAGE.to_owned()));
}

#[test]
fn resubmit_after_failure_clears_error() {
    let mut controller = ready("a.png");
    let submission = controller.begin_submit().expect("submission");
    controller.complete(submission.id, Err(AnalyzeError::Timeout), now());
    assert_eq!(controller.phase(), Phase::Failed);

    assert!(controller.begin_submit().is_some());
    assert_eq!(controller.request(), &RequestState::Loading);
}

// =============================================================
// Stale completions
// =============================================================

#[test]
fn completion_after_cancel_is_ignored() {
    let mut controller = ready("a.png");
    let submission = controller.begin_submit().expect("submission");

    assert_eq!(controller.cancel(), Some(submission.id));
    assert_eq!(controller.phase(), Phase::Ready);
    assert!(!controller.complete(submission.id, Ok("late".to_owned()), now()));
    assert_eq!(controller.request(), &RequestState::Idle);
    assert!(controller.history().is_empty());
}

#[test]
fn cancel_without_request_is_noop() {
    let mut controller = ready("a.png");
    assert_eq!(controller.cancel(), None);
    assert_eq!(controller.phase(), Phase::Ready);
}

#[test]
fn cancel_after_clear_returns_to_idle() {
    let mut controller = ready("a.png");
    controller.begin_submit().expect("submission");
    controller.clear_file();
    controller.cancel();
    assert_eq!(controller.phase(), Phase::Idle);
}

#[test]
fn completion_after_reselect_is_ignored() {
    let mut controller = ready("a.png");
    let old = controller.begin_submit().expect("submission");

    controller.select_file(png("b.png"), preview("b.png")).expect("valid");
    let new = controller.begin_submit().expect("submission");
    assert_ne!(old.id, new.id);

    assert!(!controller.complete(old.id, Ok("for a".to_owned()), now()));
    assert_eq!(controller.request(), &RequestState::Loading);
    assert!(controller.complete(new.id, Ok("for b".to_owned()), now()));
    assert_eq!(controller.request(), &RequestState::Succeeded("for b".to_owned()));
}

// =============================================================
// Result view
// =============================================================

#[test]
fn success_view_is_markup_stripped() {
    let mut controller = ready("a.png");
    let submission = controller.begin_submit().expect("submission");
    controller.complete(submission.id, Ok("# Result\n*Likely* benign.".to_owned()), now());

    assert_eq!(controller.result_view(), ResultView::Success(strip_markdown("# Result\n*Likely* benign.")));
    assert_eq!(controller.result_view(), ResultView::Success("Result\n\nLikely benign.".to_owned()));
}

#[test]
fn history_title_falls_back_for_blank_names() {
    assert_eq!(history_title("  "), "Skin analysis");
    assert_eq!(history_title("lesion.jpg"), "Skin analysis: lesion.jpg");
}

#[test]
fn reject_file_drops_pending_and_abandons_request() {
    let mut controller = ready("a.png");
    let submission = controller.begin_submit().expect("submission");

    controller.reject_file(&AnalyzeError::TooLarge { size: MAX_UPLOAD_BYTES * 2, limit: MAX_UPLOAD_BYTES });
    assert!(controller.pending().is_none());
    assert_eq!(controller.phase(), Phase::Failed);
    assert!(!controller.complete(submission.id, Ok("late".to_owned()), now()));
}

#[test]
fn unreadable_file_replaces_result_with_error() {
    let mut controller = ready("a.png");
    let submission = controller.begin_submit().expect("submission");
    assert!(controller.complete(submission.id, Ok("**Benign**".to_owned()), now()));

    controller.reject_file(&AnalyzeError::Unreadable("NotReadableError".to_owned()));
    assert!(controller.pending().is_none());
    assert_eq!(
        controller.result_view(),
        ResultView::Error("Could not read the selected image. Please try again.".to_owned())
    );
    assert!(!controller.can_submit());
}
