//! Client for the external analysis endpoint.
//!
//! SYSTEM CONTEXT
//! ==============
//! The analyze page hands a submission to `submit`, which performs exactly
//! one multipart `POST` (field `image`) and feeds the outcome back into the
//! controller. The endpoint is opaque: `{ "analysis": text }` on success,
//! `{ "error": message }` on failure.
//!
//! ERROR HANDLING
//! ==============
//! A server `error` field is surfaced verbatim. Transport failures and
//! responses of any other shape collapse to the generic message. In the
//! browser the request races a timer and is aborted on expiry or on
//! explicit cancel.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "analysis_test.rs"]
mod analysis_test;

use chrono::Utc;
use leptos::prelude::*;

use super::types::AnalyzeResponse;
use crate::state::analyze::{AnalyzeController, AnalyzeError, SelectedFile};

pub const DEFAULT_ANALYZE_URL: &str = "http://127.0.0.1:5000/analyze";
pub const DEFAULT_ANALYZE_TIMEOUT_MS: u32 = 60_000;
/// Multipart field carrying the image bytes.
pub const IMAGE_FIELD: &str = "image";

/// Analysis endpoint, overridable at build time with `DERMAI_ANALYZE_URL`.
#[must_use]
pub fn analyze_url() -> &'static str {
    resolve_endpoint(option_env!("DERMAI_ANALYZE_URL"))
}

/// Request timeout, overridable at build time with `DERMAI_ANALYZE_TIMEOUT_MS`.
#[must_use]
pub fn analyze_timeout_ms() -> u32 {
    resolve_timeout_ms(option_env!("DERMAI_ANALYZE_TIMEOUT_MS"))
}

fn resolve_endpoint(raw: Option<&'static str>) -> &'static str {
    raw.map(str::trim).filter(|v| !v.is_empty()).unwrap_or(DEFAULT_ANALYZE_URL)
}

fn resolve_timeout_ms(raw: Option<&str>) -> u32 {
    raw.and_then(|v| v.trim().parse::<u32>().ok())
        .filter(|ms| *ms > 0)
        .unwrap_or(DEFAULT_ANALYZE_TIMEOUT_MS)
}

/// Map an HTTP status and body to the controller outcome.
///
/// # Errors
///
/// `Server` when the body carries a non-empty `error` field, `Transport`
/// for anything else that is not a success with an `analysis` field.
pub fn interpret_response(status: u16, body: &str) -> Result<String, AnalyzeError> {
    let parsed: AnalyzeResponse = serde_json::from_str(body).unwrap_or_default();
    if (200..300).contains(&status) {
        if let Some(text) = parsed.analysis {
            return Ok(text);
        }
    }
    match parsed.error.filter(|e| !e.trim().is_empty()) {
        Some(message) => Err(AnalyzeError::Server(message)),
        None => Err(AnalyzeError::Transport(format!("unexpected response (status {status})"))),
    }
}

// =============================================================================
// SUBMISSION
// =============================================================================

/// Something that can run one analysis request.
pub trait AnalysisService {
    fn analyze(&self, file: &SelectedFile) -> impl Future<Output = Result<String, AnalyzeError>>;
}

/// Mutable access to the controller across the request's suspension point.
pub trait ControllerStore {
    /// Run `f` against the controller; `None` if the store is gone.
    fn update_controller<R>(&self, f: impl FnOnce(&mut AnalyzeController) -> R) -> Option<R>;
}

impl ControllerStore for RwSignal<AnalyzeController> {
    fn update_controller<R>(&self, f: impl FnOnce(&mut AnalyzeController) -> R) -> Option<R> {
        self.try_update(f)
    }
}

/// Run one submit cycle. Returns whether a request was issued.
///
/// No request is made when nothing is selected (the controller shows the
/// "no image" error) or when one is already in flight.
pub async fn submit<C, S>(store: &C, service: &S) -> bool
where
    C: ControllerStore,
    S: AnalysisService,
{
    let Some(Some(submission)) = store.update_controller(AnalyzeController::begin_submit) else {
        return false;
    };

    let outcome = service.analyze(&submission.file).await;
    if let Err(e) = &outcome {
        log::warn!("analysis request failed: {e:?}");
    }

    let applied = store.update_controller(|c| c.complete(submission.id, outcome, Utc::now()));
    if applied != Some(true) {
        log::debug!("dropped stale analysis outcome for {:?}", submission.id);
    }
    true
}

// =============================================================================
// BROWSER TRANSPORT
// =============================================================================

#[cfg(feature = "hydrate")]
thread_local! {
    static IN_FLIGHT: std::cell::RefCell<Option<web_sys::AbortController>> = const { std::cell::RefCell::new(None) };
}

/// Abort the browser request currently in flight, if any.
pub fn abort_in_flight() {
    #[cfg(feature = "hydrate")]
    IN_FLIGHT.with(|slot| {
        if let Some(abort) = slot.borrow_mut().take() {
            abort.abort();
        }
    });
}

/// `fetch`-backed analysis service used in the browser.
#[derive(Clone, Copy, Debug)]
pub struct HttpAnalysisService {
    url: &'static str,
    timeout_ms: u32,
}

impl HttpAnalysisService {
    #[must_use]
    pub fn from_build_env() -> Self {
        Self { url: analyze_url(), timeout_ms: analyze_timeout_ms() }
    }

    #[must_use]
    pub fn url(&self) -> &'static str {
        self.url
    }
}

impl AnalysisService for HttpAnalysisService {
    async fn analyze(&self, file: &SelectedFile) -> Result<String, AnalyzeError> {
        #[cfg(feature = "hydrate")]
        {
            use futures::future::{Either, select};

            let abort = web_sys::AbortController::new()
                .map_err(|e| AnalyzeError::Transport(format!("abort controller: {e:?}")))?;
            IN_FLIGHT.with(|slot| {
                if let Some(previous) = slot.borrow_mut().replace(abort.clone()) {
                    previous.abort();
                }
            });

            let request = Box::pin(post_image(self.url, file, abort.signal()));
            let timer = Box::pin(gloo_timers::future::TimeoutFuture::new(self.timeout_ms));
            let outcome = match select(request, timer).await {
                Either::Left((result, _)) => result,
                Either::Right(((), _)) => {
                    abort.abort();
                    Err(AnalyzeError::Timeout)
                }
            };

            IN_FLIGHT.with(|slot| {
                let mut slot = slot.borrow_mut();
                if slot.as_ref() == Some(&abort) {
                    slot.take();
                }
            });
            outcome
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (file, self.timeout_ms);
            Err(AnalyzeError::Transport("not available on server".to_owned()))
        }
    }
}

/// `POST` the image as multipart form data. The browser sets the
/// `multipart/form-data` content type with its boundary.
#[cfg(feature = "hydrate")]
async fn post_image(url: &str, file: &SelectedFile, signal: web_sys::AbortSignal) -> Result<String, AnalyzeError> {
    let transport = |e: String| AnalyzeError::Transport(e);

    let blob = crate::util::browser::bytes_to_blob(&file.bytes, &file.content_type).map_err(transport)?;
    let form = web_sys::FormData::new().map_err(|e| transport(format!("{e:?}")))?;
    form.append_with_blob_and_filename(IMAGE_FIELD, &blob, &file.name)
        .map_err(|e| transport(format!("{e:?}")))?;

    let resp = gloo_net::http::Request::post(url)
        .abort_signal(Some(&signal))
        .body(form)
        .map_err(|e| transport(e.to_string()))?
        .send()
        .await
        .map_err(|e| transport(e.to_string()))?;

    let status = resp.status();
    let body = resp.text().await.unwrap_or_default();
    interpret_response(status, &body)
}
