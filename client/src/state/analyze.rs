//! Upload/analyze controller state.
//!
//! DESIGN
//! ======
//! The controller is a plain state machine held in an `RwSignal` by the app
//! shell. Pages call `select_file`/`clear_file`/`cancel` directly and drive
//! the single analysis request between `begin_submit` and `complete`.
//!
//! Every submission is tagged with a `RequestId`. `complete` applies an
//! outcome only when its id matches the request currently in flight, so a
//! late response for a cancelled, timed-out, or superseded request is
//! dropped instead of overwriting newer state.

#[cfg(test)]
#[path = "analyze_test.rs"]
mod analyze_test;

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::util::markdown::strip_markdown;

/// Upload size cap advertised by the upload box and enforced on selection.
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Shown when submit is pressed with nothing selected.
pub const NO_IMAGE_MESSAGE: &str = "Please upload an image first.";

/// Fallback for transport failures and responses without an `error` field.
pub const GENERIC_FAILURE_MESSAGE: &str = "An unknown error occurred.";

/// Errors surfaced in the analyze page's error box.
///
/// `Display` is the user-facing message; variant payloads carry detail for logs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnalyzeError {
    #[error("Please upload an image first.")]
    NoImage,
    #[error("Unsupported image type. Please choose a PNG, JPG, or WEBP file.")]
    UnsupportedType(String),
    #[error("Image is too large. The maximum size is {} MB.", .limit / (1024 * 1024))]
    TooLarge { size: usize, limit: usize },
    #[error("Could not read the selected image. Please try again.")]
    Unreadable(String),
    #[error("{0}")]
    Server(String),
    #[error("An unknown error occurred.")]
    Transport(String),
    #[error("The analysis request timed out. Please try again.")]
    Timeout,
}

// =============================================================================
// IMAGE FILES
// =============================================================================

/// Image encodings the analysis endpoint accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageKind {
    Png,
    Jpeg,
    Webp,
}

impl ImageKind {
    /// Value for the file input's `accept` attribute.
    pub const ACCEPT: &'static str = "image/png, image/jpeg, image/webp";

    /// Map a MIME type (parameters and case ignored) to a permitted kind.
    #[must_use]
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        let essence = content_type.split(';').next().unwrap_or_default().trim().to_ascii_lowercase();
        match essence.as_str() {
            "image/png" => Some(Self::Png),
            "image/jpeg" | "image/jpg" | "image/pjpeg" => Some(Self::Jpeg),
            "image/webp" => Some(Self::Webp),
            _ => None,
        }
    }

    #[must_use]
    pub fn content_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Webp => "image/webp",
        }
    }
}

/// A file picked by the user, read into memory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub content_type: String,
    pub bytes: Arc<[u8]>,
}

impl SelectedFile {
    #[must_use]
    pub fn new(name: impl Into<String>, content_type: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self { name: name.into(), content_type: content_type.into(), bytes: bytes.into() }
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// Check encoding and size against what the upload box permits.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedType` or `TooLarge`.
    pub fn validate(&self) -> Result<ImageKind, AnalyzeError> {
        let kind = ImageKind::from_content_type(&self.content_type)
            .ok_or_else(|| AnalyzeError::UnsupportedType(self.content_type.clone()))?;
        if self.size() > MAX_UPLOAD_BYTES {
            return Err(AnalyzeError::TooLarge { size: self.size(), limit: MAX_UPLOAD_BYTES });
        }
        Ok(kind)
    }
}

/// Locally addressable preview of a pending upload (an object URL in the browser).
///
/// The browser URL is revoked when the last clone of the owning `Arc` drops.
#[derive(Debug, PartialEq, Eq)]
pub struct PreviewHandle {
    url: String,
}

impl PreviewHandle {
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Drop for PreviewHandle {
    fn drop(&mut self) {
        #[cfg(feature = "hydrate")]
        {
            let _ = web_sys::Url::revoke_object_url(&self.url);
        }
    }
}

/// The currently selected, not-yet-submitted image and its preview.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingUpload {
    pub file: SelectedFile,
    pub preview: Arc<PreviewHandle>,
}

impl PendingUpload {
    #[must_use]
    pub fn preview_url(&self) -> &str {
        self.preview.url()
    }
}

// =============================================================================
// REQUEST STATE
// =============================================================================

/// Status of the analysis request cycle. Exactly one is active.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum RequestState {
    #[default]
    Idle,
    Loading,
    Succeeded(String),
    Failed(String),
}

/// Controller phase derived from the pending upload and request state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Ready,
    Submitting,
    Succeeded,
    Failed,
}

/// Identifier tagging one submission.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RequestId(u64);

/// Everything the caller needs to issue the network call for one submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Submission {
    pub id: RequestId,
    pub file: SelectedFile,
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct InFlight {
    id: RequestId,
    file_name: String,
}

/// Session-scoped record of a completed analysis.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryEntry {
    pub title: String,
    pub created_at: DateTime<Utc>,
}

/// What the result area should render for the current state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResultView {
    Hidden,
    Loading,
    Error(String),
    /// Markup-stripped analysis text, shared by the panel and the PDF export.
    Success(String),
}

// =============================================================================
// CONTROLLER
// =============================================================================

/// Upload/analyze state machine: `Idle -> Ready -> Submitting -> Succeeded | Failed`.
#[derive(Clone, Debug, Default)]
pub struct AnalyzeController {
    pending: Option<PendingUpload>,
    request: RequestState,
    in_flight: Option<InFlight>,
    next_request: u64,
    history: Vec<HistoryEntry>,
}

impl AnalyzeController {
    #[must_use]
    pub fn pending(&self) -> Option<&PendingUpload> {
        self.pending.as_ref()
    }

    #[must_use]
    pub fn request(&self) -> &RequestState {
        &self.request
    }

    /// Past analyses, most recent first.
    #[must_use]
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        match (&self.request, &self.pending) {
            (RequestState::Loading, _) => Phase::Submitting,
            (RequestState::Succeeded(_), _) => Phase::Succeeded,
            (RequestState::Failed(_), _) => Phase::Failed,
            (RequestState::Idle, Some(_)) => Phase::Ready,
            (RequestState::Idle, None) => Phase::Idle,
        }
    }

    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Whether the submit control should be enabled.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.pending.is_some() && self.in_flight.is_none()
    }

    /// Replace the pending upload with `file`.
    ///
    /// Any previous result or error is cleared and an in-flight request is
    /// abandoned. A rejected file leaves no pending upload and shows the
    /// validation message.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedType` or `TooLarge` when the file is rejected.
    pub fn select_file(&mut self, file: SelectedFile, preview: PreviewHandle) -> Result<(), AnalyzeError> {
        self.in_flight = None;
        match file.validate() {
            Ok(_) => {
                self.pending = Some(PendingUpload { file, preview: Arc::new(preview) });
                self.request = RequestState::Idle;
                Ok(())
            }
            Err(e) => {
                self.reject_file(&e);
                Err(e)
            }
        }
    }

    /// Record a file rejected without being selected: too large by its
    /// reported size, or unreadable.
    pub fn reject_file(&mut self, error: &AnalyzeError) {
        self.in_flight = None;
        self.pending = None;
        self.request = RequestState::Failed(error.to_string());
    }

    /// Discard the pending upload. The result area is left as is.
    pub fn clear_file(&mut self) {
        self.pending = None;
    }

    /// Start a submission.
    ///
    /// Returns `None` without touching state when a request is already in
    /// flight, and `None` with the "no image" error when nothing is selected.
    pub fn begin_submit(&mut self) -> Option<Submission> {
        if self.in_flight.is_some() {
            return None;
        }
        let Some(pending) = &self.pending else {
            self.request = RequestState::Failed(AnalyzeError::NoImage.to_string());
            return None;
        };

        self.next_request += 1;
        let id = RequestId(self.next_request);
        let file = pending.file.clone();
        self.in_flight = Some(InFlight { id, file_name: file.name.clone() });
        self.request = RequestState::Loading;
        Some(Submission { id, file })
    }

    /// Apply the outcome of submission `id`. Returns `false` for stale ids.
    pub fn complete(&mut self, id: RequestId, outcome: Result<String, AnalyzeError>, now: DateTime<Utc>) -> bool {
        let Some(in_flight) = self.in_flight.take_if(|f| f.id == id) else {
            return false;
        };

        match outcome {
            Ok(text) => {
                self.history.insert(0, HistoryEntry { title: history_title(&in_flight.file_name), created_at: now });
                self.request = RequestState::Succeeded(text);
            }
            Err(e) => {
                self.request = RequestState::Failed(e.to_string());
            }
        }
        true
    }

    /// Abandon the in-flight request, returning its id so the caller can abort it.
    pub fn cancel(&mut self) -> Option<RequestId> {
        let in_flight = self.in_flight.take()?;
        self.request = RequestState::Idle;
        Some(in_flight.id)
    }

    /// Result-area rendering for the current state.
    #[must_use]
    pub fn result_view(&self) -> ResultView {
        match &self.request {
            RequestState::Idle => ResultView::Hidden,
            RequestState::Loading => ResultView::Loading,
            RequestState::Failed(message) => ResultView::Error(message.clone()),
            RequestState::Succeeded(text) => ResultView::Success(strip_markdown(text)),
        }
    }
}

fn history_title(file_name: &str) -> String {
    let name = file_name.trim();
    if name.is_empty() { "Skin analysis".to_owned() } else { format!("Skin analysis: {name}") }
}
