//! Authenticated upload-and-analyze page.
//!
//! ARCHITECTURE
//! ============
//! All request state lives in the shell-owned `AnalyzeController` signal.
//! This page turns browser events into controller operations: picking a file
//! reads it and calls `select_file` (aborting any in-flight request), the
//! analyze button runs `net::analysis::submit` on a local task, and cancel
//! aborts the fetch before the controller drops its completion.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::components::analysis_results::AnalysisResults;
use crate::components::derm_tips::DermTips;
use crate::components::sidebar::Sidebar;
use crate::net::analysis::{HttpAnalysisService, abort_in_flight, submit};
use crate::state::analyze::{AnalyzeController, ImageKind, MAX_UPLOAD_BYTES};
use crate::state::session::SessionState;
use crate::util::auth::install_unauth_redirect;

#[component]
pub fn AnalyzePage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let controller = expect_context::<RwSignal<AnalyzeController>>();
    install_unauth_redirect(session, use_navigate());

    let file_input = NodeRef::<leptos::html::Input>::new();

    let on_pick = move |_| {
        #[cfg(feature = "hydrate")]
        {
            if let Some(input) = file_input.get() {
                input.click();
            }
        }
    };

    let on_file_change = move |_ev: leptos::ev::Event| {
        #[cfg(feature = "hydrate")]
        {
            let Some(input) = file_input.get() else {
                return;
            };
            let Some(file) = input.files().and_then(|files| files.get(0)) else {
                return;
            };
            // Allow re-selecting the same file later.
            input.set_value("");
            select_browser_file(controller, file);
        }
    };

    let on_analyze = move |_| {
        leptos::task::spawn_local(async move {
            let service = HttpAnalysisService::from_build_env();
            submit(&controller, &service).await;
        });
    };

    let on_cancel = move |_| {
        abort_in_flight();
        controller.update(|c| {
            c.cancel();
        });
    };

    let on_clear = move |_| controller.update(AnalyzeController::clear_file);

    let preview_url = move || controller.with(|c| c.pending().map(|p| p.preview_url().to_owned()));
    let submitting = move || controller.with(AnalyzeController::is_submitting);

    view! {
        <div class="analyze-layout">
            <Sidebar/>

            <main class="analyze-main">
                <header>
                    <h1>"Derm-AI"</h1>
                </header>

                <input
                    node_ref=file_input
                    type="file"
                    accept=ImageKind::ACCEPT
                    style="display: none"
                    on:change=on_file_change
                />

                <div class="upload-section" role="button" on:click=on_pick>
                    <p>"Click to upload an image"</p>
                    <span>{format!("PNG, JPG, or WEBP (max {} MB)", MAX_UPLOAD_BYTES / (1024 * 1024))}</span>
                </div>

                {move || {
                    preview_url()
                        .map(|src| {
                            view! {
                                <div class="preview">
                                    <img src=src alt="Selected lesion"/>
                                    <button class="clear-button" on:click=on_clear disabled=submitting>
                                        "Remove image"
                                    </button>
                                </div>
                            }
                        })
                }}

                <div class="analyze-actions">
                    <button
                        class="analyze-button"
                        on:click=on_analyze
                        disabled=move || !controller.with(AnalyzeController::can_submit)
                    >
                        {move || if submitting() { "Analyzing..." } else { "Run Educational Analysis" }}
                    </button>
                    <Show when=submitting>
                        <button class="cancel-button" on:click=on_cancel>
                            "Cancel"
                        </button>
                    </Show>
                </div>

                <AnalysisResults/>
            </main>

            <aside class="analyze-aside">
                <DermTips/>
            </aside>
        </div>
    }
}

/// Read a picked file and hand it to the controller.
#[cfg(feature = "hydrate")]
fn select_browser_file(controller: RwSignal<AnalyzeController>, file: web_sys::File) {
    use crate::state::analyze::{AnalyzeError, PreviewHandle};
    use crate::util::browser;

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let reported_size = file.size() as usize;
    if reported_size > MAX_UPLOAD_BYTES {
        abort_in_flight();
        controller.update(|c| c.reject_file(&AnalyzeError::TooLarge { size: reported_size, limit: MAX_UPLOAD_BYTES }));
        return;
    }

    leptos::task::spawn_local(async move {
        let selected = match browser::read_selected_file(&file).await {
            Ok(selected) => selected,
            Err(e) => {
                log::warn!("reading picked file failed: {e}");
                abort_in_flight();
                controller.update(|c| c.reject_file(&AnalyzeError::Unreadable(e)));
                return;
            }
        };
        let preview = browser::create_preview(&file).unwrap_or_else(|| PreviewHandle::new(String::new()));

        abort_in_flight();
        controller.update(|c| {
            if let Err(e) = c.select_file(selected, preview) {
                log::info!("rejected picked file: {e:?}");
            }
        });
    });
}
