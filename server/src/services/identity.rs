//! Identity verification: local credentials and Google ID tokens.
//!
//! SYSTEM CONTEXT
//! ==============
//! Both login endpoints call into this module and turn a successful result
//! into a session. Nothing here touches the session store.
//!
//! DESIGN
//! ======
//! Local accounts are configured as Argon2 PHC hashes and verified with
//! `argon2`. Google ID tokens are checked by Google's `tokeninfo` endpoint
//! (signature and expiry) and then their claims are checked against the
//! configured client id.

#[cfg(test)]
#[path = "identity_test.rs"]
mod identity_test;

use std::sync::LazyLock;

use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use dermai_client::net::types::UserProfile;
use serde::Deserialize;

use crate::config::LocalAccount;

pub const GOOGLE_TOKENINFO_URL: &str = "https://oauth2.googleapis.com/tokeninfo";
const GOOGLE_ISSUERS: [&str; 2] = ["accounts.google.com", "https://accounts.google.com"];

#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    #[error("Please fill in all fields.")]
    MissingFields,
    #[error("Invalid credentials. Try again!")]
    InvalidCredentials,
    #[error("sign-in method not configured")]
    NotConfigured,
    #[error("identity token rejected: {0}")]
    TokenRejected(String),
    #[error("identity provider request failed: {0}")]
    Provider(String),
    #[error("password hashing failed: {0}")]
    Hash(String),
}

/// Hash a password into the PHC string form used by `DERMAI_LOCAL_ACCOUNTS`.
///
/// # Errors
///
/// Returns `Hash` if Argon2 rejects the input.
pub fn hash_password(password: &str) -> Result<String, IdentityError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| IdentityError::Hash(e.to_string()))
}

/// Check local credentials against the configured accounts.
///
/// # Errors
///
/// `MissingFields` for empty input, `NotConfigured` when no accounts exist,
/// and `InvalidCredentials` for an unknown email or wrong password.
pub fn verify_local(accounts: &[LocalAccount], email: &str, password: &str) -> Result<UserProfile, IdentityError> {
    let email = email.trim().to_ascii_lowercase();
    if email.is_empty() || password.is_empty() {
        return Err(IdentityError::MissingFields);
    }
    if accounts.is_empty() {
        return Err(IdentityError::NotConfigured);
    }

    let Some(account) = accounts.iter().find(|a| a.email == email) else {
        // Spend the same Argon2 work as a known email before rejecting.
        if let Some(hash) = DUMMY_HASH.as_deref() {
            let _ = verify_hash(hash, password);
        }
        return Err(IdentityError::InvalidCredentials);
    };
    verify_hash(&account.password_hash, password)?;

    Ok(UserProfile { display_name: email_local_part(&email).to_owned(), email, avatar_url: None })
}

/// Hash checked for unknown emails so both rejections cost one verification.
static DUMMY_HASH: LazyLock<Option<String>> = LazyLock::new(|| hash_password("dermai-unknown-account").ok());

fn verify_hash(phc: &str, password: &str) -> Result<(), IdentityError> {
    let parsed = PasswordHash::new(phc).map_err(|_| IdentityError::InvalidCredentials)?;
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .map_err(|_| IdentityError::InvalidCredentials)
}

fn email_local_part(email: &str) -> &str {
    email.split('@').next().unwrap_or(email)
}

// =============================================================================
// GOOGLE ID TOKENS
// =============================================================================

/// Claims returned by the `tokeninfo` endpoint. Booleans arrive as strings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GoogleClaims {
    #[serde(default)]
    pub aud: String,
    #[serde(default)]
    pub iss: String,
    pub email: Option<String>,
    #[serde(default, deserialize_with = "flexible_bool")]
    pub email_verified: bool,
    pub name: Option<String>,
    pub picture: Option<String>,
}

fn flexible_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flexible {
        Bool(bool),
        Text(String),
    }
    Ok(match Flexible::deserialize(deserializer)? {
        Flexible::Bool(b) => b,
        Flexible::Text(s) => s.eq_ignore_ascii_case("true"),
    })
}

/// Check verified claims and normalize them into a profile.
///
/// # Errors
///
/// Returns `TokenRejected` for a foreign audience or issuer, or a missing or
/// unverified email.
pub fn profile_from_claims(claims: GoogleClaims, client_id: &str) -> Result<UserProfile, IdentityError> {
    if claims.aud != client_id {
        return Err(IdentityError::TokenRejected("audience mismatch".to_owned()));
    }
    if !GOOGLE_ISSUERS.contains(&claims.iss.as_str()) {
        return Err(IdentityError::TokenRejected(format!("unexpected issuer {:?}", claims.iss)));
    }
    let email = claims
        .email
        .map(|e| e.trim().to_owned())
        .filter(|e| !e.is_empty())
        .ok_or_else(|| IdentityError::TokenRejected("token has no email".to_owned()))?;
    if !claims.email_verified {
        return Err(IdentityError::TokenRejected("email not verified".to_owned()));
    }

    let display_name = claims
        .name
        .map(|n| n.trim().to_owned())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| email_local_part(&email).to_owned());
    let avatar_url = claims.picture.filter(|p| !p.trim().is_empty());

    Ok(UserProfile { display_name, email, avatar_url })
}

/// Compact JWS shape: three non-empty base64url segments.
fn looks_like_jwt(token: &str) -> bool {
    let segments: Vec<&str> = token.split('.').collect();
    segments.len() == 3
        && segments
            .iter()
            .all(|s| !s.is_empty() && s.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_'))
}

/// Verifies Google ID tokens for one OAuth client.
#[derive(Debug, Clone)]
pub struct GoogleVerifier {
    client_id: String,
    tokeninfo_url: String,
    http: reqwest::Client,
}

impl GoogleVerifier {
    #[must_use]
    pub fn new(client_id: impl Into<String>) -> Self {
        Self::with_endpoint(client_id, GOOGLE_TOKENINFO_URL)
    }

    #[must_use]
    pub fn with_endpoint(client_id: impl Into<String>, tokeninfo_url: impl Into<String>) -> Self {
        Self { client_id: client_id.into(), tokeninfo_url: tokeninfo_url.into(), http: reqwest::Client::new() }
    }

    /// Verify `credential` and return the signed-in profile.
    ///
    /// # Errors
    ///
    /// `MissingFields` for an empty credential, `TokenRejected` when Google or
    /// the claim checks reject it, `Provider` when Google cannot be reached.
    pub async fn verify(&self, credential: &str) -> Result<UserProfile, IdentityError> {
        let credential = credential.trim();
        if credential.is_empty() {
            return Err(IdentityError::MissingFields);
        }
        if !looks_like_jwt(credential) {
            return Err(IdentityError::TokenRejected("malformed token".to_owned()));
        }

        let resp = self
            .http
            .get(&self.tokeninfo_url)
            .query(&[("id_token", credential)])
            .send()
            .await
            .map_err(|e| IdentityError::Provider(e.to_string()))?;

        let status = resp.status();
        if status.is_client_error() {
            return Err(IdentityError::TokenRejected(format!("tokeninfo answered {status}")));
        }
        if !status.is_success() {
            return Err(IdentityError::Provider(format!("tokeninfo answered {status}")));
        }

        let claims: GoogleClaims = resp.json().await.map_err(|e| IdentityError::Provider(e.to_string()))?;
        profile_from_claims(claims, &self.client_id)
    }
}
