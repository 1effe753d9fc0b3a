//! REST helpers for the host server's `/api/auth/*` endpoints.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): stubs returning `None`/error since these endpoints
//! are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Callers get `Option`/`Result` outputs instead of panics so auth failures
//! degrade UI behavior without crashing hydration. Error strings are ready
//! to show in the login form.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::types::UserProfile;
#[cfg(any(test, feature = "hydrate"))]
use super::types::ErrorBody;

pub const ME_ENDPOINT: &str = "/api/auth/me";
pub const LOGIN_ENDPOINT: &str = "/api/auth/login";
pub const GOOGLE_LOGIN_ENDPOINT: &str = "/api/auth/google";
pub const LOGOUT_ENDPOINT: &str = "/api/auth/logout";

/// Message for a failed sign-in: the server's `error` field when present,
/// otherwise a status-based fallback.
#[cfg(any(test, feature = "hydrate"))]
fn sign_in_failed_message(status: u16, body: &str) -> String {
    if let Ok(ErrorBody { error }) = serde_json::from_str::<ErrorBody>(body) {
        if !error.trim().is_empty() {
            return error;
        }
    }
    match status {
        401 => "Invalid credentials. Try again!".to_owned(),
        503 => "This sign-in method is not available.".to_owned(),
        _ => format!("sign-in failed: {status}"),
    }
}

/// Fetch the signed-in profile from `/api/auth/me`.
/// Returns `None` if not authenticated or on the server.
pub async fn fetch_current_user() -> Option<UserProfile> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get(ME_ENDPOINT).send().await.ok()?;
        if !resp.ok() {
            return None;
        }
        resp.json::<UserProfile>().await.ok()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        None
    }
}

/// Sign in with local credentials via `POST /api/auth/login`.
///
/// # Errors
///
/// Returns a displayable message if the request fails or is rejected.
pub async fn login_with_password(email: &str, password: &str) -> Result<UserProfile, String> {
    #[cfg(feature = "hydrate")]
    {
        let payload = super::types::LoginRequest { email: email.to_owned(), password: password.to_owned() };
        post_for_profile(LOGIN_ENDPOINT, &payload).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (email, password);
        Err("not available on server".to_owned())
    }
}

/// Exchange a Google ID token for a session via `POST /api/auth/google`.
///
/// # Errors
///
/// Returns a displayable message if the request fails or the token is rejected.
pub async fn login_with_google(credential: &str) -> Result<UserProfile, String> {
    #[cfg(feature = "hydrate")]
    {
        let payload = super::types::GoogleLoginRequest { credential: credential.to_owned() };
        post_for_profile(GOOGLE_LOGIN_ENDPOINT, &payload).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = credential;
        Err("not available on server".to_owned())
    }
}

/// End the server session by calling `POST /api/auth/logout`.
pub async fn logout() {
    #[cfg(feature = "hydrate")]
    {
        if let Err(e) = gloo_net::http::Request::post(LOGOUT_ENDPOINT).send().await {
            log::warn!("logout request failed: {e}");
        }
    }
}

#[cfg(feature = "hydrate")]
async fn post_for_profile<T: serde::Serialize>(url: &str, payload: &T) -> Result<UserProfile, String> {
    let resp = gloo_net::http::Request::post(url)
        .json(payload)
        .map_err(|e| e.to_string())?
        .send()
        .await
        .map_err(|e| e.to_string())?;
    if !resp.ok() {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        return Err(sign_in_failed_message(status, &body));
    }
    resp.json::<UserProfile>().await.map_err(|e| e.to_string())
}
