//! MuscleMetrics REST API Client
//!
//! HTTP client for the MuscleMetrics backend. Every request:
//! - carries `Authorization: Bearer <token>` when a token is stored
//! - uses the standard timeout, or the extended one for large listings
//! - maps non-success statuses to [`ClientError`]
//!
//! Two read endpoints never fail outright: muscle groups and exercise
//! templates fall back to built-in data when the network call rejects (see
//! [`fallback`]). Exercise template lookups first retry against the
//! `/public` variant of the endpoint.
//!
//! Endpoint groups live in their own modules as `impl ApiClient` blocks.

mod auth;
mod error;
mod exercise_templates;
pub mod fallback;
mod muscle_groups;
mod workout_templates;
mod workouts;

pub use error::{ClientError, ClientResult, ErrorCategory};

use reqwest::{Client, Method, Response};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use std::time::Duration;

use crate::session::TokenStore;
use error::extract_message;

/// Production backend
pub const DEFAULT_API_BASE: &str = "https://muscle-metrics-backend-production.up.railway.app/api";

/// Configuration for the API client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL including the `/api` prefix
    pub base_url: String,
    /// Timeout for ordinary requests
    pub timeout: Duration,
    /// Timeout for workout listings, date ranges and exercise history
    pub long_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE.to_string(),
            timeout: Duration::from_secs(60),
            long_timeout: Duration::from_secs(90),
        }
    }
}

impl From<&crate::config::ApiConfig> for ClientConfig {
    fn from(config: &crate::config::ApiConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
            long_timeout: Duration::from_secs(config.long_timeout_secs),
        }
    }
}

/// Where a piece of data came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    /// The authenticated endpoint
    Remote,
    /// The `/public` variant after the authenticated call failed
    Public,
    /// Built-in data after every network attempt failed
    Fallback,
}

/// Data paired with its source
#[derive(Debug, Clone)]
pub struct Fetched<T> {
    pub data: T,
    pub source: DataSource,
}

impl<T> Fetched<T> {
    pub fn remote(data: T) -> Self {
        Self {
            data,
            source: DataSource::Remote,
        }
    }

    pub fn public(data: T) -> Self {
        Self {
            data,
            source: DataSource::Public,
        }
    }

    pub fn fallback(data: T) -> Self {
        Self {
            data,
            source: DataSource::Fallback,
        }
    }

    /// Whether the data is built-in rather than from the server
    pub fn is_fallback(&self) -> bool {
        self.source == DataSource::Fallback
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Fetched<U> {
        Fetched {
            data: f(self.data),
            source: self.source,
        }
    }
}

/// Which timeout a request should use
#[derive(Debug, Clone, Copy)]
pub(crate) enum Timeout {
    Standard,
    Extended,
}

/// MuscleMetrics REST API client
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    config: Arc<ClientConfig>,
    tokens: Arc<dyn TokenStore>,
}

impl ApiClient {
    /// Create a new client reading its bearer token from `tokens`
    pub fn new(config: ClientConfig, tokens: Arc<dyn TokenStore>) -> ClientResult<Self> {
        let http = Client::builder()
            .user_agent(concat!("MuscleMetrics/", env!("CARGO_PKG_VERSION")))
            .build()?;

        tracing::debug!(base_url = %config.base_url, "API client configured");

        Ok(Self {
            http,
            config: Arc::new(config),
            tokens,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn tokens(&self) -> &Arc<dyn TokenStore> {
        &self.tokens
    }

    /// Whether a token is currently stored
    pub async fn has_token(&self) -> bool {
        matches!(self.tokens.load().await, Ok(Some(_)))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    fn timeout_for(&self, timeout: Timeout) -> Duration {
        match timeout {
            Timeout::Standard => self.config.timeout,
            Timeout::Extended => self.config.long_timeout,
        }
    }

    /// Send a request and turn non-success statuses into errors.
    ///
    /// Auth failures that report an expired or invalid token clear the
    /// stored token so the next run forces a fresh login.
    pub(crate) async fn execute<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        timeout: Timeout,
    ) -> ClientResult<Response>
    where
        B: Serialize + ?Sized,
    {
        let url = self.url(path);
        let mut builder = self
            .http
            .request(method.clone(), &url)
            .timeout(self.timeout_for(timeout));

        match self.tokens.load().await {
            Ok(Some(token)) => {
                builder = builder.bearer_auth(token);
                tracing::debug!(%method, %url, "Sending authenticated request");
            }
            Ok(None) => {
                tracing::debug!(%method, %url, "Sending request without token");
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read session token, sending request without it");
            }
        }

        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| {
            let err = ClientError::from(e);
            if matches!(err, ClientError::Timeout) {
                tracing::error!(%method, %url, "API request timed out");
            } else {
                tracing::error!(%method, %url, error = %err, "API request got no response");
            }
            err
        })?;

        let status = response.status();
        if status.is_success() {
            tracing::debug!(%method, %url, status = status.as_u16(), "Successful response");
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let err = ClientError::from_status(status.as_u16(), extract_message(&text));

        match err.category() {
            ErrorCategory::Auth => {
                tracing::error!(%url, status = status.as_u16(), "Authentication/authorization error");
                if err.invalidates_token() {
                    tracing::info!("Token expired or invalid, clearing stored token");
                    if let Err(e) = self.tokens.clear().await {
                        tracing::warn!(error = %e, "Failed to clear stored token");
                    }
                }
            }
            ErrorCategory::Server => {
                tracing::error!(%url, status = status.as_u16(), "Server error, the backend may be experiencing issues");
            }
            _ => {
                tracing::warn!(%url, status = status.as_u16(), error = %err, "API error response");
            }
        }

        Err(err)
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str, timeout: Timeout) -> ClientResult<T> {
        let response = self.execute::<()>(Method::GET, path, None, timeout).await?;
        decode(response).await
    }

    pub(crate) async fn post<B, T>(&self, path: &str, body: Option<&B>) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.execute(Method::POST, path, body, Timeout::Standard).await?;
        decode(response).await
    }

    /// POST whose response body is not needed
    pub(crate) async fn post_discard<B>(&self, path: &str, body: &B) -> ClientResult<()>
    where
        B: Serialize + ?Sized,
    {
        self.execute(Method::POST, path, Some(body), Timeout::Standard)
            .await?;
        Ok(())
    }

    /// PUT whose response body is not needed
    pub(crate) async fn put_discard<B>(&self, path: &str, body: &B) -> ClientResult<()>
    where
        B: Serialize + ?Sized,
    {
        self.execute(Method::PUT, path, Some(body), Timeout::Standard)
            .await?;
        Ok(())
    }

    pub(crate) async fn put<B, T>(&self, path: &str, body: &B) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .execute(Method::PUT, path, Some(body), Timeout::Standard)
            .await?;
        decode(response).await
    }

    pub(crate) async fn delete(&self, path: &str) -> ClientResult<()> {
        self.execute::<()>(Method::DELETE, path, None, Timeout::Standard)
            .await?;
        Ok(())
    }

    /// GET the authenticated endpoint, retrying the public one on any failure
    pub(crate) async fn get_with_public_retry<T: DeserializeOwned>(
        &self,
        path: &str,
        public_path: &str,
    ) -> ClientResult<Fetched<T>> {
        match self.get(path, Timeout::Standard).await {
            Ok(data) => Ok(Fetched::remote(data)),
            Err(e) => {
                tracing::info!(path, error = %e, "Authenticated endpoint failed, trying public endpoint");
                self.get(public_path, Timeout::Standard)
                    .await
                    .map(Fetched::public)
            }
        }
    }

    /// Backend connectivity check
    pub async fn ping(&self) -> ClientResult<serde_json::Value> {
        let response = self
            .execute::<()>(Method::GET, "/public/ping", None, Timeout::Standard)
            .await?;
        let text = response.text().await?;
        Ok(serde_json::from_str(&text).unwrap_or(serde_json::Value::String(text)))
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
    response
        .json::<T>()
        .await
        .map_err(|e| ClientError::Decode(e.to_string()))
}

/// Percent-encode a path segment or query value
pub(crate) fn encode(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}
