//! REST client for the gym backend.
//!
//! Every verb runs the path through `NormalizeRules` before dispatch, attaches
//! the session token as bearer auth, and unwraps the response body.
//!
//! ERROR HANDLING
//! ==============
//! A 401 from any endpoint means the stored token is no longer good: the
//! session is cleared and the navigator is sent to `/login` before the error
//! is handed back, so callers only need to stop what they were doing.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::sync::Arc;

use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::path::NormalizeRules;
use super::types::{ApiError, LoginRequest, RegisterRequest, TokenResponse, User, VerifyTokenResponse};
use crate::config::ClientConfig;
use crate::router::Navigate;
use crate::router::guard::LOGIN_PATH;
use crate::state::session::{Credentials, Session};

// =============================================================================
// CLIENT
// =============================================================================

pub struct ApiClient {
    http: reqwest::Client,
    config: ClientConfig,
    rules: NormalizeRules,
    session: Session,
    navigator: Arc<dyn Navigate>,
}

impl ApiClient {
    pub fn new(config: ClientConfig, session: Session, navigator: Arc<dyn Navigate>) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeouts.request())
            .connect_timeout(config.timeouts.connect())
            .build()
            .map_err(|e| ApiError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, config, rules: NormalizeRules::default(), session, navigator })
    }

    #[must_use]
    pub fn with_rules(mut self, rules: NormalizeRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Absolute URL a request for `path` is sent to.
    pub fn endpoint(&self, path: &str) -> String {
        self.config.url_for(&self.rules.normalize(path))
    }

    /// `GET path`, with `params` appended to any query already on the path.
    pub async fn fetch<T: DeserializeOwned>(&self, path: &str, params: &[(&str, &str)]) -> Result<T, ApiError> {
        self.dispatch(Method::GET, path, params, None).await
    }

    /// `POST path` with a JSON body.
    pub async fn create<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_json::to_value(body)?;
        self.dispatch(Method::POST, path, &[], Some(body)).await
    }

    /// `PUT path` with a JSON body.
    pub async fn replace<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_json::to_value(body)?;
        self.dispatch(Method::PUT, path, &[], Some(body)).await
    }

    /// `DELETE path`.
    pub async fn remove<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.dispatch(Method::DELETE, path, &[], None).await
    }

    async fn dispatch<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        params: &[(&str, &str)],
        body: Option<Value>,
    ) -> Result<T, ApiError> {
        let normalized = self.rules.normalize(path);
        let url = reqwest::Url::parse(&self.config.url_for(&normalized))
            .map_err(|e| ApiError::InvalidUrl(format!("{normalized}: {e}")))?;

        let mut request = self.http.request(method.clone(), url);
        if !params.is_empty() {
            request = request.query(params);
        }
        if let Some(token) = self.session.token() {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        tracing::debug!(%method, path = %normalized, "api request");
        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!(%method, path = %normalized, "unauthorized; clearing session");
            self.session.clear();
            self.navigator.navigate(LOGIN_PATH);
            return Err(ApiError::Unauthorized { body: text });
        }
        if !status.is_success() {
            return Err(ApiError::Status { status: status.as_u16(), body: text });
        }

        parse_body(&text)
    }

    // =========================================================================
    // AUTH
    // =========================================================================

    /// Exchange credentials for a token, then look up username + role.
    ///
    /// On any failure after the token is issued the session is cleared again,
    /// so a half-written record never survives.
    pub async fn login(&self, username: &str, password: &str) -> Result<Credentials, ApiError> {
        let token: TokenResponse = self.create("/login", &LoginRequest { username, password }).await?;
        self.session.set_token(&token.access_token);

        let verified: VerifyTokenResponse = match self.dispatch(Method::POST, "/verify-token", &[], None).await {
            Ok(verified) => verified,
            Err(e) => {
                self.session.clear();
                return Err(e);
            }
        };
        if !verified.valid {
            self.session.clear();
            return Err(ApiError::Unauthorized { body: "token rejected by verify-token".to_owned() });
        }

        let username = verified.username.unwrap_or_else(|| username.to_owned());
        let role = verified.role.unwrap_or_default();
        self.session.establish(&token.access_token, &username, &role);
        tracing::info!(%username, %role, "logged in");
        Ok(self.session.credentials())
    }

    /// Create a new account. Does not sign in.
    pub async fn register(&self, request: &RegisterRequest) -> Result<User, ApiError> {
        self.create("/register", request).await
    }

    /// The user the stored token belongs to.
    pub async fn current_user(&self) -> Result<User, ApiError> {
        self.fetch("/me", &[]).await
    }

    /// Drop the credential record and return to the login page.
    pub fn logout(&self) -> String {
        let username = self.session.username().unwrap_or_default();
        self.session.clear();
        tracing::info!(%username, "logged out");
        self.navigator.navigate(LOGIN_PATH)
    }
}

/// Decode a response body; an empty body reads as JSON `null`.
fn parse_body<T: DeserializeOwned>(text: &str) -> Result<T, ApiError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(serde_json::from_value(Value::Null)?);
    }
    Ok(serde_json::from_str(text)?)
}
