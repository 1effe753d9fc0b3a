//! Wire types shared by the browser client and the host server.
//!
//! DESIGN
//! ======
//! The server depends on this crate (with `ssr`) and serializes the same
//! structs, so the auth endpoints and the client agree on field names.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// Normalized profile of the signed-in user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub display_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

/// Body of `POST /api/auth/login`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Body of `POST /api/auth/google`: the ID token from the sign-in widget.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoogleLoginRequest {
    pub credential: String,
}

/// Error body returned by the auth endpoints and the analysis endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Response of the analysis endpoint: `{ "analysis": ... }` on success,
/// `{ "error": ... }` on failure.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct AnalyzeResponse {
    #[serde(default)]
    pub analysis: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}
