//! In-memory session store.
//!
//! ARCHITECTURE
//! ============
//! A sign-in mints a random token, stored with the profile and an expiry.
//! The token travels in an HttpOnly cookie; `/api/auth/me` and logout look
//! it up here. Sessions live only as long as the process.
//!
//! TRADE-OFFS
//! ==========
//! Expired entries are dropped lazily on lookup and by a periodic sweep, so
//! memory stays bounded without a timer per session.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::collections::HashMap;
use std::fmt::Write;
use std::sync::Arc;
use std::time::{Duration, Instant};

use dermai_client::net::types::UserProfile;
use rand::Rng;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

pub(crate) fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(s, "{b:02x}");
    }
    s
}

/// Generate a cryptographically random 32-byte hex token.
#[must_use]
pub fn generate_token() -> String {
    let bytes: [u8; 32] = rand::rng().random();
    bytes_to_hex(&bytes)
}

/// Longest lifetime a session may be given.
pub const MAX_SESSION_TTL: Duration = Duration::from_secs(crate::config::MAX_SESSION_TTL_HOURS * 3600);

#[derive(Debug, Clone)]
struct SessionEntry {
    profile: UserProfile,
    expires_at: Instant,
}

/// Token -> profile map shared by all handlers.
#[derive(Debug, Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<String, SessionEntry>>>,
    ttl: Duration,
}

impl SessionStore {
    /// Store whose sessions live for `ttl`, capped at `MAX_SESSION_TTL`.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self { sessions: Arc::new(RwLock::new(HashMap::new())), ttl: ttl.min(MAX_SESSION_TTL) }
    }

    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Create a session for `profile`, returning its token.
    pub async fn create(&self, profile: UserProfile) -> String {
        self.create_at(profile, Instant::now()).await
    }

    /// Profile for a live session; expired sessions are removed.
    pub async fn get(&self, token: &str) -> Option<UserProfile> {
        self.get_at(token, Instant::now()).await
    }

    /// Delete a session. Returns whether it existed.
    pub async fn remove(&self, token: &str) -> bool {
        self.sessions.write().await.remove(token).is_some()
    }

    /// Drop every expired session, returning how many were removed.
    pub async fn purge_expired(&self) -> usize {
        self.purge_expired_at(Instant::now()).await
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    async fn create_at(&self, profile: UserProfile, now: Instant) -> String {
        let token = generate_token();
        // An unrepresentable expiry yields a session that is already expired.
        let expires_at = now.checked_add(self.ttl).unwrap_or(now);
        let entry = SessionEntry { profile, expires_at };
        self.sessions.write().await.insert(token.clone(), entry);
        token
    }

    async fn get_at(&self, token: &str, now: Instant) -> Option<UserProfile> {
        {
            let sessions = self.sessions.read().await;
            match sessions.get(token) {
                None => return None,
                Some(entry) if entry.expires_at > now => return Some(entry.profile.clone()),
                Some(_) => {}
            }
        }
        let mut sessions = self.sessions.write().await;
        if sessions.get(token).is_some_and(|e| e.expires_at <= now) {
            sessions.remove(token);
        }
        None
    }

    async fn purge_expired_at(&self, now: Instant) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, entry| entry.expires_at > now);
        before - sessions.len()
    }
}

/// Periodically purge expired sessions.
pub fn spawn_sweeper(store: SessionStore, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        interval.tick().await;
        loop {
            interval.tick().await;
            let removed = store.purge_expired().await;
            if removed > 0 {
                let remaining = store.len().await;
                tracing::debug!(removed, remaining, "purged expired sessions");
            }
        }
    })
}
