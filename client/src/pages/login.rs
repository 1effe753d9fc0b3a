//! Login page supporting local credentials and Google sign-in.
//!
//! SYSTEM CONTEXT
//! ==============
//! Both methods are verified by the host server, which answers with the
//! profile and sets the session cookie. The page then records the profile in
//! the session context; the authed-redirect guard moves on to `/analyze`.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::state::session::SessionState;
use crate::util::auth::install_authed_redirect;

pub const MISSING_FIELDS_MESSAGE: &str = "Please fill in all fields.";

#[cfg(feature = "hydrate")]
const GOOGLE_SCRIPT_ID: &str = "google-identity-services";
#[cfg(feature = "hydrate")]
const GOOGLE_SCRIPT_SRC: &str = "https://accounts.google.com/gsi/client";
const GOOGLE_BUTTON_ID: &str = "google-signin-button";

/// Google OAuth client id baked in at build time with `DERMAI_GOOGLE_CLIENT_ID`.
pub fn google_client_id() -> Option<&'static str> {
    option_env!("DERMAI_GOOGLE_CLIENT_ID").map(str::trim).filter(|v| !v.is_empty())
}

/// Trim the email and require both fields.
fn validate_login_input(email: &str, password: &str) -> Result<(String, String), &'static str> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err(MISSING_FIELDS_MESSAGE);
    }
    Ok((email.to_owned(), password.to_owned()))
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    install_authed_redirect(session, use_navigate());

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let (email_value, password_value) = match validate_login_input(&email.get(), &password.get()) {
            Ok(values) => values,
            Err(msg) => {
                error.set(msg.to_owned());
                return;
            }
        };
        error.set(String::new());
        busy.set(true);

        leptos::task::spawn_local(async move {
            match crate::net::api::login_with_password(&email_value, &password_value).await {
                Ok(profile) => session.update(|s| s.sign_in(profile)),
                Err(e) => error.set(e),
            }
            password.set(String::new());
            busy.set(false);
        });
    };

    #[cfg(feature = "hydrate")]
    {
        if let Some(client_id) = google_client_id() {
            install_google_button(client_id, session, error);
        }
    }

    view! {
        <div class="login-wrapper">
            <div class="login-card">
                <h1 class="brand">"Derm-AI"</h1>
                <p class="subtitle">"Smart Dermatology Assistant"</p>
                <form on:submit=on_submit>
                    <input
                        type="email"
                        placeholder="Email address"
                        autocomplete="username"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <input
                        type="password"
                        placeholder="Password"
                        autocomplete="current-password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <Show when=move || !error.get().is_empty()>
                        <p class="error" role="alert">{move || error.get()}</p>
                    </Show>
                    <button type="submit" class="login-btn" disabled=move || busy.get()>
                        {move || if busy.get() { "Signing in..." } else { "Sign In" }}
                    </button>
                </form>
                <Show when=move || google_client_id().is_some()>
                    <div class="login-divider"><span>"or"</span></div>
                    <div id=GOOGLE_BUTTON_ID class="google-signin"></div>
                </Show>
            </div>
        </div>
    }
}

/// Load Identity Services and render its button once the container exists.
#[cfg(feature = "hydrate")]
fn install_google_button(client_id: &'static str, session: RwSignal<SessionState>, error: RwSignal<String>) {
    use crate::util::browser;

    browser::ensure_script(GOOGLE_SCRIPT_ID, GOOGLE_SCRIPT_SRC);

    leptos::task::spawn_local(async move {
        // The script loads asynchronously; give it a few seconds.
        for _ in 0..50 {
            if browser::google_identity_ready() {
                break;
            }
            gloo_timers::future::TimeoutFuture::new(100).await;
        }

        let Some(container) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(GOOGLE_BUTTON_ID))
        else {
            return;
        };

        let on_credential = move |credential: String| {
            error.set(String::new());
            leptos::task::spawn_local(async move {
                match crate::net::api::login_with_google(&credential).await {
                    Ok(profile) => session.update(|s| s.sign_in(profile)),
                    Err(e) => error.set(e),
                }
            });
        };

        if let Err(e) = browser::render_google_button(client_id, &container, on_credential) {
            log::warn!("google sign-in unavailable: {e}");
        }
    });
}
