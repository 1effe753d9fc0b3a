//! Session state for the current browser tab.
//!
//! SYSTEM CONTEXT
//! ==============
//! Owned by the app shell in an `RwSignal` and provided by context. Route
//! guards read it to decide between the login page and the analyze view.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use crate::net::types::UserProfile;

/// `LoggedOut` while `profile` is `None`, `LoggedIn` otherwise.
///
/// `loading` is true until the shell has asked the server for an existing
/// session; guards hold off redirecting until then.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionState {
    pub profile: Option<UserProfile>,
    pub loading: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self { profile: None, loading: true }
    }
}

impl SessionState {
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.profile.is_some()
    }

    /// Record the outcome of the start-up session check.
    pub fn restored(&mut self, profile: Option<UserProfile>) {
        self.profile = profile;
        self.loading = false;
    }

    pub fn sign_in(&mut self, profile: UserProfile) {
        self.profile = Some(profile);
        self.loading = false;
    }

    pub fn sign_out(&mut self) {
        self.profile = None;
        self.loading = false;
    }

    /// Name shown in the sidebar footer.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.profile.as_ref().map(|p| p.display_name.as_str())
    }
}
