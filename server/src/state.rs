//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the session store and the configured identity methods.

use std::sync::Arc;

use crate::config::{Config, LocalAccount};
use crate::services::identity::GoogleVerifier;
use crate::services::session::SessionStore;

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; all inner fields are Arc-wrapped or Clone.
#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionStore,
    pub local_accounts: Arc<[LocalAccount]>,
    pub google: Option<Arc<GoogleVerifier>>,
    pub cookie_secure: bool,
}

impl AppState {
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            sessions: SessionStore::new(config.session_ttl),
            local_accounts: config.local_accounts.clone().into(),
            google: config.google_client_id.as_deref().map(|id| Arc::new(GoogleVerifier::new(id))),
            cookie_secure: config.cookie_secure,
        }
    }
}
