//! Backend API client implementation.
//!
//! This module provides the single point of contact with the test case
//! backend. Every request shares one base address, one timeout and JSON
//! content typing; every response passes through the same failure
//! normalization and payload decoding. There is no retry logic here, callers
//! decide what to do with a failure.

use std::time::Duration;

use reqwest::{header, Client, Method, Response, Url};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::{debug, error, info, instrument};

use super::error::{ApiError, Result};
use super::types::{
    embedded_error, ConfigStatus, GeneratedPayload, GeneratedTestCases, IssueData,
    IssueUrlRequest, IssueUrlWithAuthRequest, JiraProbe,
};
use crate::config::{BackendSettings, DEFAULT_TIMEOUT_SECS};

/// Client for the test case backend.
///
/// Cheap to clone: the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct ApiClient {
    /// The HTTP client.
    client: Client,
    /// Backend base URL without a trailing slash.
    base_url: String,
    /// Per-request timeout.
    timeout: Duration,
}

impl ApiClient {
    /// Create a client from backend settings.
    pub fn from_settings(settings: &BackendSettings) -> Result<Self> {
        Self::new(&settings.api_url, settings.timeout())
    }

    /// Create a client for `base_url` with the default timeout.
    pub fn with_base_url(base_url: &str) -> Result<Self> {
        Self::new(base_url, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a client with an explicit base URL and timeout.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidUrl` if `base_url` is not an absolute URL.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = normalize_base_url(base_url)?;
        let client = Self::build_http_client(timeout)?;
        debug!(base_url = %base_url, timeout_ms = timeout.as_millis() as u64, "Created API client");

        Ok(Self {
            client,
            base_url,
            timeout,
        })
    }

    /// Build the HTTP client with the shared transport settings.
    fn build_http_client(timeout: Duration) -> Result<Client> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(ApiError::Network)
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the per-request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Check backend liveness via `GET /health`.
    #[instrument(skip(self))]
    pub async fn health_check(&self) -> Result<()> {
        self.send(Method::GET, "/health", None::<&()>)
            .await
            .map(|_| ())
            .map_err(|e| self.log_failure("/health", e))
    }

    /// Fetch backend readiness via `GET /config`.
    #[instrument(skip(self))]
    pub async fn get_config(&self) -> Result<ConfigStatus> {
        self.execute(Method::GET, "/config", None::<&()>).await
    }

    /// Ask the backend to probe its tracker credentials via `GET /test-jira`.
    #[instrument(skip(self))]
    pub async fn test_connection(&self) -> Result<JiraProbe> {
        self.execute(Method::GET, "/test-jira", None::<&()>).await
    }

    /// Fetch issue metadata using the backend's configured credentials.
    #[instrument(skip(self))]
    pub async fn parse_issue(&self, url: &str) -> Result<IssueData> {
        self.execute(Method::POST, "/parse", Some(&IssueUrlRequest { url }))
            .await
    }

    /// Fetch issue metadata with a caller-supplied tracker token.
    #[instrument(skip(self, token))]
    pub async fn parse_issue_with_auth(&self, url: &str, token: &str) -> Result<IssueData> {
        let body = IssueUrlWithAuthRequest {
            url,
            auth_token: token,
        };
        self.execute(Method::POST, "/parse-with-auth", Some(&body))
            .await
    }

    /// Generate a test suite for an issue.
    ///
    /// The backend returns the issue context alongside the suite; both are
    /// decoded from the same payload.
    #[instrument(skip(self))]
    pub async fn generate_test_cases(&self, url: &str) -> Result<GeneratedTestCases> {
        let payload: GeneratedPayload = self
            .execute(Method::POST, "/generate-test-cases", Some(&IssueUrlRequest { url }))
            .await?;
        Ok(payload.into_generated())
    }

    /// Send a request and decode its JSON payload.
    async fn execute<T, B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let result: Result<T> = async {
            let response = self.send(method, path, body).await?;
            let payload = self.read_json(response).await?;
            decode_payload(payload)
        }
        .await;

        result.map_err(|e| self.log_failure(path, e))
    }

    /// Send a request, turning transport failures and non-2xx statuses into
    /// normalized errors.
    async fn send<B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<Response>
    where
        B: Serialize + ?Sized,
    {
        info!("Making {} request to: {}", method, path);

        let url = format!("{}{}", self.base_url, path);
        let mut request = self.client.request(method, &url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::from_transport(e, self.timeout))?;

        let status = response.status();
        if status.is_success() {
            debug!(%status, "Request succeeded");
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();
        debug!("Error response body: {}", error_body);
        Err(ApiError::from_response(status, &error_body))
    }

    /// Read a successful response body as JSON.
    async fn read_json(&self, response: Response) -> Result<Value> {
        response.json::<Value>().await.map_err(|e| {
            if e.is_decode() {
                ApiError::InvalidResponse(format!("Failed to parse response: {}", e))
            } else {
                ApiError::from_transport(e, self.timeout)
            }
        })
    }

    fn log_failure(&self, path: &str, err: ApiError) -> ApiError {
        error!(
            path,
            status = err.status().map(|s| s.as_u16()),
            transport = err.is_transport(),
            error = %err,
            "API Error"
        );
        err
    }
}

/// Decode a backend payload into its typed form.
///
/// A non-empty `error` field wins over anything else in the payload, even
/// when the remaining fields would decode cleanly.
pub(crate) fn decode_payload<T: DeserializeOwned>(payload: Value) -> Result<T> {
    if let Some(message) = embedded_error(&payload) {
        return Err(ApiError::Rejected(message));
    }

    serde_json::from_value(payload)
        .map_err(|e| ApiError::InvalidResponse(format!("Unexpected payload shape: {}", e)))
}

/// Normalize the base URL by removing trailing slashes.
fn normalize_base_url(url: &str) -> Result<String> {
    let trimmed = url.trim().trim_end_matches('/');

    let parsed = Url::parse(trimmed).map_err(|e| ApiError::InvalidUrl(format!("{}: {}", url, e)))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ApiError::InvalidUrl(format!(
            "{}: scheme must be http or https",
            url
        )));
    }

    Ok(trimmed.to_string())
}
