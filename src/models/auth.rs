//! Login request and session status payloads.

use serde::{Deserialize, Serialize};

/// Request body for `POST /api/login`.
///
/// Missing fields deserialize as empty strings and simply fail the credential check.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub password: String,
}

/// Response body for `GET /api/auth-status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthStatus {
    #[serde(rename = "isAuthenticated")]
    pub is_authenticated: bool,
}
