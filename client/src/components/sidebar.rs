//! Analyze-view sidebar: brand, tab navigation, and the logout action.
//!
//! ARCHITECTURE
//! ============
//! The active tab lives in `UiState`. The History tab is the only place the
//! controller's history entries are rendered.

use leptos::prelude::*;

use crate::components::analysis_history::AnalysisHistory;
use crate::state::analyze::AnalyzeController;
use crate::state::session::SessionState;
use crate::state::ui::{SidebarTab, UiState};

#[component]
pub fn Sidebar() -> impl IntoView {
    let ui = expect_context::<RwSignal<UiState>>();
    let session = expect_context::<RwSignal<SessionState>>();
    let controller = expect_context::<RwSignal<AnalyzeController>>();

    let on_logout = move |_| {
        crate::net::analysis::abort_in_flight();
        controller.set(AnalyzeController::default());
        ui.set(UiState::default());
        session.update(SessionState::sign_out);
        leptos::task::spawn_local(crate::net::api::logout());
    };

    let tabs = SidebarTab::ALL
        .into_iter()
        .map(|tab| {
            view! {
                <button
                    class="tab-button"
                    class:active=move || ui.get().sidebar_tab == tab
                    title=tab.label()
                    on:click=move |_| ui.update(|u| u.sidebar_tab = tab)
                >
                    <span>{tab.label()}</span>
                </button>
            }
        })
        .collect_view();

    view! {
        <div class="app-sidebar">
            <div class="sidebar-header">
                <a href="/" class="sidebar-logo">
                    <span>"Derm-AI"</span>
                </a>
            </div>

            <div class="sidebar-tabs">{tabs}</div>
            <div class="sidebar-divider"></div>

            <div class="sidebar-content">
                {move || match ui.get().sidebar_tab {
                    SidebarTab::Analyze => view! {
                        <div class="tab-content">
                            <h3>"Quick Actions"</h3>
                            <p class="content-subtitle">"Analysis tools and shortcuts"</p>
                        </div>
                    }
                    .into_any(),
                    SidebarTab::History => view! {
                        <div class="tab-content">
                            <AnalysisHistory/>
                        </div>
                    }
                    .into_any(),
                    SidebarTab::Resources => view! {
                        <div class="tab-content">
                            <h3>"Learning Resources"</h3>
                            <ul class="resources-list">
                                <li>"Documentation"</li>
                                <li>"Tutorial Videos"</li>
                                <li>"FAQ"</li>
                            </ul>
                        </div>
                    }
                    .into_any(),
                }}
            </div>

            <div class="sidebar-footer">
                <Show when=move || session.with(SessionState::is_authenticated)>
                    <div class="sidebar-profile">
                        {move || {
                            session
                                .with(|s| s.profile.as_ref().and_then(|p| p.avatar_url.clone()))
                                .map(|src| view! { <img class="sidebar-avatar" src=src alt=""/> })
                        }}
                        <div class="sidebar-profile__text">
                            <span class="sidebar-profile__name">
                                {move || session.with(|s| s.display_name().unwrap_or_default().to_owned())}
                            </span>
                            <span class="sidebar-profile__email">
                                {move || session.with(|s| s.profile.as_ref().map(|p| p.email.clone()).unwrap_or_default())}
                            </span>
                        </div>
                    </div>
                </Show>
                <button class="logout-button" on:click=on_logout>
                    <span>"Logout"</span>
                </button>
            </div>
        </div>
    }
}
