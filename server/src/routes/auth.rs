//! Auth routes: local and Google sign-in, session lookup, logout.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::sync::Arc;

use axum::extract::{FromRef, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use dermai_client::net::types::{ErrorBody, GoogleLoginRequest, LoginRequest, UserProfile};
use time::Duration;

use crate::services::identity::{self, IdentityError};
use crate::state::AppState;

pub(crate) const COOKIE_NAME: &str = "dermai_session";

fn session_cookie(token: String, secure: bool, max_age: std::time::Duration) -> Cookie<'static> {
    let max_age = Duration::try_from(max_age).unwrap_or(Duration::hours(12));
    Cookie::build((COOKIE_NAME, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(max_age)
        .build()
}

fn cleared_cookie(secure: bool) -> Cookie<'static> {
    Cookie::build((COOKIE_NAME, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(Duration::ZERO)
        .build()
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ErrorBody { error: message.into() })).into_response()
}

/// Status and user-facing message for an identity failure.
fn identity_error_response(err: &IdentityError) -> Response {
    match err {
        IdentityError::MissingFields => error_response(StatusCode::BAD_REQUEST, err.to_string()),
        IdentityError::InvalidCredentials => error_response(StatusCode::UNAUTHORIZED, err.to_string()),
        IdentityError::TokenRejected(_) => {
            error_response(StatusCode::UNAUTHORIZED, "Google sign-in could not be verified. Try again!")
        }
        IdentityError::NotConfigured => {
            error_response(StatusCode::SERVICE_UNAVAILABLE, "This sign-in method is not available.")
        }
        IdentityError::Provider(_) => {
            error_response(StatusCode::BAD_GATEWAY, "Could not reach the identity provider. Try again later.")
        }
        IdentityError::Hash(_) => error_response(StatusCode::INTERNAL_SERVER_ERROR, "Sign-in failed."),
    }
}

async fn start_session(state: &AppState, jar: CookieJar, profile: UserProfile) -> Response {
    let token = state.sessions.create(profile.clone()).await;
    let cookie = session_cookie(token, state.cookie_secure, state.sessions.ttl());
    (jar.add(cookie), Json(profile)).into_response()
}

// =============================================================================
// AUTH EXTRACTOR
// =============================================================================

/// Signed-in user resolved from the session cookie.
/// Use as a handler parameter to require authentication.
pub struct AuthUser {
    pub profile: UserProfile,
}

impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut axum::http::request::Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar.get(COOKIE_NAME).map(Cookie::value).unwrap_or_default();
        if token.is_empty() {
            return Err(StatusCode::UNAUTHORIZED);
        }

        let app_state = AppState::from_ref(state);
        let profile = app_state.sessions.get(token).await.ok_or(StatusCode::UNAUTHORIZED)?;
        Ok(Self { profile })
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

/// `POST /api/auth/login` — verify local credentials, set cookie, return profile.
pub async fn login(State(state): State<AppState>, jar: CookieJar, Json(body): Json<LoginRequest>) -> Response {
    // Argon2 verification blocks; run it off the async workers.
    let accounts = Arc::clone(&state.local_accounts);
    let outcome =
        tokio::task::spawn_blocking(move || identity::verify_local(&accounts, &body.email, &body.password))
            .await
            .unwrap_or_else(|e| Err(IdentityError::Hash(e.to_string())));

    match outcome {
        Ok(profile) => {
            tracing::info!(email = %profile.email, method = "local", "signed in");
            start_session(&state, jar, profile).await
        }
        Err(e) => {
            tracing::warn!(error = %e, method = "local", "sign-in rejected");
            identity_error_response(&e)
        }
    }
}

/// `POST /api/auth/google` — verify a Google ID token, set cookie, return profile.
pub async fn google_login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<GoogleLoginRequest>,
) -> Response {
    let Some(verifier) = &state.google else {
        return identity_error_response(&IdentityError::NotConfigured);
    };

    match verifier.verify(&body.credential).await {
        Ok(profile) => {
            tracing::info!(email = %profile.email, method = "google", "signed in");
            start_session(&state, jar, profile).await
        }
        Err(e) => {
            tracing::warn!(error = %e, method = "google", "sign-in rejected");
            identity_error_response(&e)
        }
    }
}

/// `GET /api/auth/me` — return the signed-in profile.
pub async fn me(auth: AuthUser) -> Json<UserProfile> {
    Json(auth.profile)
}

/// `POST /api/auth/logout` — delete the session if any, clear cookie.
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    if let Some(token) = jar.get(COOKIE_NAME).map(Cookie::value).filter(|t| !t.is_empty()) {
        state.sessions.remove(token).await;
    }
    (CookieJar::new().add(cleared_cookie(state.cookie_secure)), StatusCode::NO_CONTENT)
}
