//! Session-aware client for the Yume REST API.
//!
//! This module provides the `SessionClient` struct, which attaches the stored
//! access token to every request, refreshes it once when the backend rejects
//! it, and tears the session down when the refresh is impossible.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use reqwest::header::{self, HeaderValue};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::auth::{CredentialKey, CredentialStore, Destination, Navigator};
use crate::config::Config;

use super::{ApiError, RequestBody, RequestDescriptor, ResponseBody, ResponseOutcome};

// ============================================================================
// Constants
// ============================================================================

const AUTH_LOGIN_PATH: &str = "auth/login";
const AUTH_REFRESH_PATH: &str = "auth/refresh";
const AUTH_LOGOUT_PATH: &str = "auth/logout";

const USER_AGENT: &str = concat!("yume-admin/", env!("CARGO_PKG_VERSION"));

/// Shown when a rejected login carries no message of its own.
const LOGIN_FAILED_MESSAGE: &str = "Login failed. Please check your credentials.";

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct TokenRequest<'a> {
    token: &'a str,
}

/// Credentials and role returned by a successful login.
#[derive(Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(rename = "accessToken", alias = "access_token", alias = "token")]
    pub access_token: String,
    #[serde(rename = "refreshToken", alias = "refresh_token", default)]
    pub refresh_token: Option<String>,
    #[serde(alias = "Role", default)]
    pub role: Option<String>,
}

impl std::fmt::Debug for LoginResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginResponse")
            .field("access_token", &"<redacted>")
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "<redacted>"))
            .field("role", &self.role)
            .finish()
    }
}

#[derive(Deserialize)]
struct RefreshResponse {
    #[serde(rename = "accessToken", alias = "access_token", alias = "token")]
    access_token: String,
    #[serde(rename = "refreshToken", alias = "refresh_token", default)]
    refresh_token: Option<String>,
}

struct Inner {
    http: Client,
    config: Config,
    store: Arc<dyn CredentialStore>,
    navigator: Arc<dyn Navigator>,
    // Held across the whole refresh read-modify-write
    refresh_lock: Mutex<()>,
}

/// Client for the Yume backend.
/// Clone is cheap - all clones share the connection pool, the credential
/// store and the refresh lock.
#[derive(Clone)]
pub struct SessionClient {
    inner: Arc<Inner>,
}

impl SessionClient {
    /// Create a new client reading credentials from `store` and reporting
    /// redirects to `navigator`.
    pub fn new(
        config: Config,
        store: Arc<dyn CredentialStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            inner: Arc::new(Inner {
                http,
                config,
                store,
                navigator,
                refresh_lock: Mutex::new(()),
            }),
        })
    }

    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Whether an access token is currently stored.
    pub fn is_authenticated(&self) -> bool {
        self.read_credential(CredentialKey::AccessToken).is_some()
    }

    /// Send the user somewhere else in the application.
    pub fn navigate(&self, destination: Destination) {
        self.inner.navigator.redirect(destination);
    }

    // ===== Authenticated requests =====

    /// Issue `request` with the stored access token.
    ///
    /// On 401 (and 403 when `refresh_on_forbidden` is set) the access token is
    /// refreshed once and the request re-issued once; the retry's outcome is
    /// returned as-is, even if it is rejected again. When no refresh is
    /// possible the session is torn down and `AuthExpired` returned.
    pub async fn send(&self, request: &RequestDescriptor) -> ResponseOutcome {
        let token = self.read_credential(CredentialKey::AccessToken);
        debug!(method = %request.method, path = %request.path, "Sending request");

        let response = match self.issue(request, token.as_deref()).await {
            Ok(response) => response,
            Err(e) => {
                warn!(path = %request.path, error = %e, "Request failed before a response arrived");
                return ResponseOutcome::NetworkFailure(e);
            }
        };

        if !self.is_auth_failure(response.status()) {
            return Self::read_outcome(response).await;
        }

        info!(
            status = %response.status(),
            path = %request.path,
            "Access token rejected, attempting refresh"
        );

        let Some(new_token) = self.refresh(token.as_deref()).await else {
            return ResponseOutcome::AuthExpired;
        };

        match self.issue(request, Some(&new_token)).await {
            Ok(response) => {
                if self.is_auth_failure(response.status()) {
                    warn!(path = %request.path, "Request rejected again after refresh");
                }
                Self::read_outcome(response).await
            }
            Err(e) => {
                warn!(path = %request.path, error = %e, "Retry after refresh failed");
                ResponseOutcome::NetworkFailure(e)
            }
        }
    }

    /// Issue `request` without credentials and without refresh handling.
    pub async fn send_public(&self, request: &RequestDescriptor) -> ResponseOutcome {
        debug!(method = %request.method, path = %request.path, "Sending public request");
        match self.issue(request, None).await {
            Ok(response) => Self::read_outcome(response).await,
            Err(e) => ResponseOutcome::NetworkFailure(e),
        }
    }

    fn is_auth_failure(&self, status: StatusCode) -> bool {
        status == StatusCode::UNAUTHORIZED
            || (status == StatusCode::FORBIDDEN && self.inner.config.refresh_on_forbidden)
    }

    fn read_credential(&self, key: CredentialKey) -> Option<String> {
        match self.inner.store.get(key) {
            Ok(value) => value.filter(|v| !v.is_empty()),
            Err(e) => {
                warn!(key = %key, error = %e, "Failed to read credential");
                None
            }
        }
    }

    fn build(
        &self,
        request: &RequestDescriptor,
        token: Option<&str>,
    ) -> Result<reqwest::RequestBuilder, reqwest::Error> {
        let url = self.inner.config.endpoint(&request.path);
        let mut headers = request.headers.clone();

        match &request.body {
            RequestBody::Multipart(_) => {
                // The transport must generate the boundary
                if headers.remove(header::CONTENT_TYPE).is_some() {
                    warn!(path = %request.path, "Dropping caller Content-Type on multipart request");
                }
            }
            RequestBody::Json(_) | RequestBody::Empty => {
                if !headers.contains_key(header::CONTENT_TYPE) {
                    headers.insert(
                        header::CONTENT_TYPE,
                        HeaderValue::from_static("application/json"),
                    );
                }
            }
        }

        if token.is_some() {
            headers.remove(header::AUTHORIZATION);
        }

        let mut builder = self.inner.http.request(request.method.clone(), url).headers(headers);

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(token) = token {
            builder = builder.bearer_auth(token);
        }

        builder = match &request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.body(value.to_string()),
            RequestBody::Multipart(form) => builder.multipart(form.to_form()?),
        };

        Ok(builder)
    }

    async fn issue(
        &self,
        request: &RequestDescriptor,
        token: Option<&str>,
    ) -> Result<reqwest::Response, reqwest::Error> {
        self.build(request, token)?.send().await
    }

    async fn read_outcome(response: reqwest::Response) -> ResponseOutcome {
        let status = response.status();
        match response.text().await {
            Ok(text) => ResponseOutcome::Success {
                status,
                body: ResponseBody::from_text(text),
            },
            Err(e) => ResponseOutcome::NetworkFailure(e),
        }
    }

    // ===== Refresh and teardown =====

    /// Obtain a fresh access token, or tear the session down.
    ///
    /// `rejected` is the token the failed request carried. If the stored token
    /// differs by the time the refresh lock is held, another request already
    /// refreshed and its token is reused without calling the backend. If it is
    /// gone, another request already tore the session down.
    async fn refresh(&self, rejected: Option<&str>) -> Option<String> {
        let _guard = self.inner.refresh_lock.lock().await;

        match self.read_credential(CredentialKey::AccessToken) {
            Some(current) if rejected != Some(current.as_str()) => {
                debug!("Access token was refreshed by a concurrent request");
                return Some(current);
            }
            None if rejected.is_some() => {
                debug!("Session was already ended by a concurrent request");
                return None;
            }
            _ => {}
        }

        let Some(refresh_token) = self.read_credential(CredentialKey::RefreshToken) else {
            warn!("No refresh token stored, ending session");
            self.teardown();
            return None;
        };

        match self.request_refresh(&refresh_token).await {
            Ok(refreshed) => {
                if let Err(e) = self
                    .inner
                    .store
                    .set(CredentialKey::AccessToken, &refreshed.access_token)
                {
                    warn!(error = %e, "Failed to persist refreshed access token");
                }
                if let Some(ref rotated) = refreshed.refresh_token {
                    if let Err(e) = self.inner.store.set(CredentialKey::RefreshToken, rotated) {
                        warn!(error = %e, "Failed to persist rotated refresh token");
                    }
                }
                info!("Access token refreshed");
                Some(refreshed.access_token)
            }
            Err(e) => {
                warn!(error = %e, "Token refresh failed, ending session");
                self.teardown();
                None
            }
        }
    }

    async fn request_refresh(&self, refresh_token: &str) -> Result<RefreshResponse, ApiError> {
        let request = RequestDescriptor::post(AUTH_REFRESH_PATH).json(&TokenRequest {
            token: refresh_token,
        })?;
        self.send_public(&request).await.into_json()
    }

    /// Erase every stored credential and redirect to the login entry point.
    ///
    /// Erase failures are logged and do not stop the redirect.
    pub fn teardown(&self) {
        for key in CredentialKey::ALL {
            if let Err(e) = self.inner.store.erase(key) {
                warn!(key = %key, error = %e, "Failed to erase credential");
            }
        }
        info!("Session ended, redirecting to login");
        self.inner.navigator.redirect(Destination::Login);
    }

    // ===== Session lifecycle =====

    /// Authenticate and store the returned credentials.
    ///
    /// Role checks are left to the caller; see [`crate::auth::login_admin`].
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let request = RequestDescriptor::post(AUTH_LOGIN_PATH).json(&LoginRequest { email, password })?;
        let outcome = self.send_public(&request).await;

        if let ResponseOutcome::Success { status, body } = &outcome {
            if !status.is_success() && body.message().is_none() {
                return Err(ApiError::Application {
                    status: *status,
                    message: LOGIN_FAILED_MESSAGE.to_string(),
                });
            }
        }

        let login: LoginResponse = outcome.into_json()?;

        self.inner
            .store
            .set(CredentialKey::AccessToken, &login.access_token)?;
        match login.refresh_token {
            Some(ref refresh) => self.inner.store.set(CredentialKey::RefreshToken, refresh)?,
            // Never pair a new access token with a previous session's refresh token
            None => self.inner.store.erase(CredentialKey::RefreshToken)?,
        }

        info!(role = ?login.role, "Login successful");
        Ok(login)
    }

    /// Revoke the session on the backend (best effort) and tear it down locally.
    pub async fn logout(&self) {
        let access = self.read_credential(CredentialKey::AccessToken);
        let request = match self.read_credential(CredentialKey::RefreshToken) {
            Some(token) => RequestDescriptor::post(AUTH_LOGOUT_PATH)
                .json_value(serde_json::json!({ "token": token })),
            None => RequestDescriptor::post(AUTH_LOGOUT_PATH),
        };

        match self.issue(&request, access.as_deref()).await {
            Ok(response) if response.status().is_success() => {
                debug!("Backend revoked the session");
            }
            Ok(response) => {
                warn!(status = %response.status(), "Backend rejected logout");
            }
            Err(e) => {
                warn!(error = %e, "Logout request failed");
            }
        }

        self.teardown();
    }
}
