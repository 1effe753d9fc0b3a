//! Server configuration parsed from environment variables.
//!
//! Variables:
//! - `PORT`: listen port (default 3000)
//! - `DERMAI_LOCAL_ACCOUNTS`: `email=argon2-phc-hash` entries separated by `;`
//! - `GOOGLE_CLIENT_ID`: OAuth client id accepted as the ID token audience
//! - `SESSION_TTL_HOURS`: server session lifetime (default 12, at most 8760)
//! - `COOKIE_SECURE`: mark the session cookie `Secure`
//!
//! `RUST_LOG` is read separately by the tracing subscriber.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::time::Duration;

use argon2::password_hash::PasswordHash;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_SESSION_TTL_HOURS: u64 = 12;
/// One year.
pub const MAX_SESSION_TTL_HOURS: u64 = 24 * 365;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value:?}")]
    InvalidValue { var: &'static str, value: String },
    #[error("invalid DERMAI_LOCAL_ACCOUNTS entry {entry:?}: {reason}")]
    InvalidAccount { entry: String, reason: &'static str },
}

/// A locally configured sign-in account.
#[derive(Clone, PartialEq, Eq)]
pub struct LocalAccount {
    /// Trimmed, lowercased email.
    pub email: String,
    /// Argon2 hash in PHC string form.
    pub password_hash: String,
}

impl std::fmt::Debug for LocalAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalAccount").field("email", &self.email).finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    pub local_accounts: Vec<LocalAccount>,
    pub google_client_id: Option<String>,
    pub session_ttl: Duration,
    pub cookie_secure: bool,
}

impl Config {
    /// Build typed config from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is present but malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build typed config from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is present but malformed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = match non_empty(lookup("PORT")) {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue { var: "PORT", value: raw })?,
            None => DEFAULT_PORT,
        };

        let local_accounts = match non_empty(lookup("DERMAI_LOCAL_ACCOUNTS")) {
            Some(raw) => parse_accounts(&raw)?,
            None => Vec::new(),
        };

        let google_client_id = non_empty(lookup("GOOGLE_CLIENT_ID"));

        let ttl_hours = match non_empty(lookup("SESSION_TTL_HOURS")) {
            Some(raw) => raw
                .parse::<u64>()
                .ok()
                .filter(|h| (1..=MAX_SESSION_TTL_HOURS).contains(h))
                .ok_or(ConfigError::InvalidValue { var: "SESSION_TTL_HOURS", value: raw })?,
            None => DEFAULT_SESSION_TTL_HOURS,
        };

        let cookie_secure = match non_empty(lookup("COOKIE_SECURE")) {
            Some(raw) => parse_bool(&raw).ok_or(ConfigError::InvalidValue { var: "COOKIE_SECURE", value: raw })?,
            None => false,
        };

        Ok(Self {
            port,
            local_accounts,
            google_client_id,
            session_ttl: Duration::from_secs(ttl_hours * 3600),
            cookie_secure,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_owned()).filter(|v| !v.is_empty())
}

pub(crate) fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Parse `email=phc;email=phc`. PHC strings contain `=`, so only the first
/// one separates the email.
fn parse_accounts(raw: &str) -> Result<Vec<LocalAccount>, ConfigError> {
    let mut accounts: Vec<LocalAccount> = Vec::new();
    for entry in raw.split(';').map(str::trim).filter(|e| !e.is_empty()) {
        let invalid = |reason| ConfigError::InvalidAccount { entry: redact(entry), reason };

        let (email, hash) = entry.split_once('=').ok_or_else(|| invalid("expected email=hash"))?;
        let email = email.trim().to_ascii_lowercase();
        let hash = hash.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(invalid("email is missing or malformed"));
        }
        if PasswordHash::new(hash).is_err() {
            return Err(invalid("password hash is not a PHC string"));
        }
        if accounts.iter().any(|a| a.email == email) {
            return Err(invalid("duplicate email"));
        }
        accounts.push(LocalAccount { email, password_hash: hash.to_owned() });
    }
    Ok(accounts)
}

/// Keep only the email part of an entry for error messages.
fn redact(entry: &str) -> String {
    entry.split_once('=').map_or_else(|| entry.to_owned(), |(email, _)| format!("{}=...", email.trim()))
}
