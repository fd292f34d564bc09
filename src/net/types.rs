//! Wire types and errors for the REST client.

use serde::{Deserialize, Serialize};

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by request client operations.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The server answered 401. The session has already been cleared and the
    /// navigator sent to `/login` by the time the caller sees this.
    #[error("unauthorized: {body}")]
    Unauthorized { body: String },

    /// The server answered with any other non-success status.
    #[error("request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    /// The request never produced a response (connect, timeout, TLS).
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// A request body could not be encoded or the response body was not the
    /// expected JSON shape.
    #[error("JSON encode/decode failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Base URL + path did not form a valid URL.
    #[error("invalid request url: {0}")]
    InvalidUrl(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

impl ApiError {
    /// HTTP status carried by this error, when the server responded.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized { .. } => Some(401),
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }
}

// =============================================================================
// AUTH
// =============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Body of `POST /login`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

/// Body of `POST /verify-token`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VerifyTokenResponse {
    pub valid: bool,
    pub username: Option<String>,
    pub role: Option<String>,
}

/// Payload for `POST /register`.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub password: String,
    pub role: String,
}

/// User record returned by `/me` and `/register`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct User {
    #[serde(alias = "_id")]
    pub id: String,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub role: String,
    #[serde(default)]
    pub balance: f64,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}
