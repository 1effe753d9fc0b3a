//! Result area: loading indicator, error box, or the analysis panel.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pure rendering of `AnalyzeController::result_view`. The success panel
//! shows the stripped text and exports exactly that text to PDF.

use leptos::prelude::*;

use crate::state::analyze::{AnalyzeController, ResultView};

#[component]
pub fn AnalysisResults() -> impl IntoView {
    let controller = expect_context::<RwSignal<AnalyzeController>>();
    let view_state = Memo::new(move |_| controller.with(AnalyzeController::result_view));

    move || match view_state.get() {
        ResultView::Hidden => ().into_any(),
        ResultView::Loading => view! {
            <div class="results-section loading">
                <div class="loader-container">
                    <div class="spinner"></div>
                    <p>"Analyzing image..."</p>
                </div>
            </div>
        }
        .into_any(),
        ResultView::Error(message) => view! {
            <div class="results-section error">
                <div class="error-box" role="alert">
                    <p>{message}</p>
                </div>
            </div>
        }
        .into_any(),
        ResultView::Success(text) => view! { <AnalysisPanel text/> }.into_any(),
    }
}

/// Success panel with the PDF download action.
#[component]
fn AnalysisPanel(text: String) -> impl IntoView {
    let export_error = RwSignal::new(None::<String>);
    let text = StoredValue::new(text);

    let on_download = move |_| {
        export_error.set(None);
        #[cfg(feature = "hydrate")]
        {
            let report = crate::util::report::AnalysisReport::new(text.get_value(), chrono::Utc::now());
            if let Err(e) = crate::util::report::download_report(&report) {
                log::error!("report export failed: {e}");
                export_error.set(Some("Could not generate the PDF report.".to_owned()));
            }
        }
    };

    view! {
        <div class="results-section">
            <div class="results-header">
                <h2>"Analysis Results"</h2>
                <button class="download-button" on:click=on_download>
                    "Download PDF"
                </button>
            </div>
            <div class="analysis-card">
                <div class="analysis-badge">
                    <span>"AI Analysis"</span>
                </div>
                <div class="analysis-content">{text.get_value()}</div>
            </div>
            <Show when=move || export_error.get().is_some()>
                <p class="export-error">{move || export_error.get().unwrap_or_default()}</p>
            </Show>
        </div>
    }
}
