//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Redirect, Route, Router, Routes},
};

use crate::pages::{analyze::AnalyzePage, home::HomePage, login::LoginPage};
use crate::state::{analyze::AnalyzeController, session::SessionState, ui::UiState};

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the session, analyze-controller, and UI contexts and restores an
/// existing server session once mounted in the browser.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let session = RwSignal::new(SessionState::default());
    let controller = RwSignal::new(AnalyzeController::default());
    let ui = RwSignal::new(UiState::default());

    provide_context(session);
    provide_context(controller);
    provide_context(ui);

    #[cfg(feature = "hydrate")]
    {
        leptos::task::spawn_local(async move {
            let profile = crate::net::api::fetch_current_user().await;
            session.update(|s| s.restored(profile));
        });
    }

    view! {
        <Stylesheet id="leptos" href="/pkg/dermai.css"/>
        <Title text="DermAI"/>

        <Router>
            <Routes fallback=|| view! { <Redirect path="/"/> }>
                <Route path=StaticSegment("") view=HomePage/>
                <Route path=StaticSegment("login") view=LoginPage/>
                <Route path=StaticSegment("analyze") view=AnalyzePage/>
            </Routes>
        </Router>
    }
}
