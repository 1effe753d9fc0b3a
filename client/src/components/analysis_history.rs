//! History panel listing completed analyses for this session.
//!
//! SYSTEM CONTEXT
//! ==============
//! Reads entries from the analyze controller, which prepends one per
//! successful analysis. Entries are never edited and vanish on reload.

#[cfg(test)]
#[path = "analysis_history_test.rs"]
mod analysis_history_test;

use std::fmt::Display;

use chrono::{DateTime, Local, TimeZone};
use leptos::prelude::*;

use crate::state::analyze::AnalyzeController;

pub const EMPTY_HISTORY_MESSAGE: &str = "No analyses yet";

/// `May 4, 2026 2:05 PM` in the zone of `at`.
pub fn format_history_date<Tz>(at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    at.format("%b %-d, %Y %-I:%M %p").to_string()
}

/// Analysis history list, most recent first.
#[component]
pub fn AnalysisHistory() -> impl IntoView {
    let controller = expect_context::<RwSignal<AnalyzeController>>();
    let entries = move || controller.with(|c| c.history().to_vec());

    view! {
        <div class="chat-history">
            <div class="history-header">
                <h3>"Analysis History"</h3>
            </div>
            <Show
                when=move || controller.with(|c| !c.history().is_empty())
                fallback=|| {
                    view! {
                        <div class="empty-state">
                            <p>{EMPTY_HISTORY_MESSAGE}</p>
                            <span>"Start by uploading an image to begin"</span>
                        </div>
                    }
                }
            >
                <div class="history-list">
                    {move || {
                        entries()
                            .into_iter()
                            .map(|entry| {
                                let date = format_history_date(&entry.created_at.with_timezone(&Local));
                                view! {
                                    <div class="history-item">
                                        <p class="item-title">{entry.title}</p>
                                        <span class="item-date">{date}</span>
                                    </div>
                                }
                            })
                            .collect_view()
                    }}
                </div>
            </Show>
        </div>
    }
}
