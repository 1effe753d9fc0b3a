//! Shared route-guard helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! The analyze page bounces signed-out visitors to `/login`; the login page
//! bounces signed-in visitors to `/analyze`. Both wait until the start-up
//! session check has finished.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::state::session::SessionState;

pub const LOGIN_PATH: &str = "/login";
pub const ANALYZE_PATH: &str = "/analyze";

/// Whether a guarded view should send the visitor to `/login`.
#[must_use]
pub fn should_redirect_unauth(state: &SessionState) -> bool {
    !state.loading && state.profile.is_none()
}

/// Whether the login view should send the visitor on to `/analyze`.
#[must_use]
pub fn should_redirect_authed(state: &SessionState) -> bool {
    !state.loading && state.profile.is_some()
}

fn replace() -> NavigateOptions {
    NavigateOptions { replace: true, ..NavigateOptions::default() }
}

/// Redirect to `/login` whenever the session has loaded and no profile is present.
pub fn install_unauth_redirect<F>(session: RwSignal<SessionState>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if should_redirect_unauth(&session.get()) {
            navigate(LOGIN_PATH, replace());
        }
    });
}

/// Redirect to `/analyze` whenever a profile is present.
pub fn install_authed_redirect<F>(session: RwSignal<SessionState>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if should_redirect_authed(&session.get()) {
            navigate(ANALYZE_PATH, replace());
        }
    });
}
