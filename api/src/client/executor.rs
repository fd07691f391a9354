//! Request execution with tracing instrumentation.
//!
//! This module provides the [`ApiClient`] struct for issuing JSON requests
//! against a base URL with default headers and a per-request timeout.

use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::time::Instant;
use tracing::{Span, debug, instrument, warn};
use url::Url;

use super::options::RequestOptions;
use crate::config::ApiClientConfig;
use crate::error::{ApiError, ClientError, ConfigError, ValidationError};
use crate::method::RestMethod;
use crate::response::{ApiResponse, decode_json};

/// Builder for configuring an [`ApiClient`].
#[derive(Debug)]
pub struct ApiClientBuilder {
    config: ApiClientConfig,
}

impl ApiClientBuilder {
    fn new(base_url: impl Into<String>) -> Self {
        Self {
            config: ApiClientConfig::new(base_url),
        }
    }

    /// Sets the request timeout.
    ///
    /// ## Examples
    ///
    /// ```rust,ignore
    /// use std::time::Duration;
    ///
    /// let client = ApiClient::builder("https://api.example.com")
    ///     .timeout(Duration::from_secs(3))
    ///     .build()?;
    /// ```
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.with_timeout(timeout);
        self
    }

    /// Adds a default header sent with every request.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.config = self.config.with_header(name, value);
        self
    }

    /// Builds the [`ApiClient`].
    ///
    /// ## Errors
    ///
    /// Returns an error if a header is invalid or the HTTP client cannot be constructed.
    pub fn build(self) -> Result<ApiClient, ApiError> {
        ApiClient::new(self.config)
    }
}

/// Async HTTP client for JSON endpoints.
///
/// Every call targets `base_url + path`, sends the default headers overlaid
/// with the per-call ones, and gives up once the configured timeout elapses
/// without a response. Calls are independent: nothing is retried, queued or
/// deduplicated.
///
/// ## Examples
///
/// ```rust,ignore
/// use rmkit_api::{ApiClient, ApiClientConfig};
///
/// #[derive(serde::Deserialize)]
/// struct User { id: u64, name: String }
///
/// let client = ApiClient::new(ApiClientConfig::new("https://api.example.com"))?;
/// let user = client.get::<User>("/users/1").await?;
/// println!("{} ({})", user.data.name, user.status);
/// ```
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
    headers: HeaderMap,
}

impl ApiClient {
    /// Creates a new builder for configuring an API client.
    pub fn builder(base_url: impl Into<String>) -> ApiClientBuilder {
        ApiClientBuilder::new(base_url)
    }

    /// Creates a client from a configuration, filling unset fields with defaults.
    ///
    /// ## Errors
    ///
    /// Returns an error if a configured header is invalid or the HTTP
    /// client cannot be constructed.
    pub fn new(config: ApiClientConfig) -> Result<Self, ApiError> {
        let headers = header_map(&config.resolved_headers())?;

        let client = reqwest::Client::builder()
            .pool_max_idle_per_host(10)
            .build()
            .map_err(ClientError::Build)?;

        Ok(Self {
            client,
            timeout: config.timeout(),
            base_url: config.base_url,
            headers,
        })
    }

    /// Returns the base URL every path is appended to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the per-request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the headers sent with every request.
    pub fn default_headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Performs one request and decodes the JSON response body.
    ///
    /// ## Errors
    ///
    /// - [`ConfigError`] if `base_url + path` is not a URL or a per-call header is invalid
    /// - [`ClientError::Timeout`] if no response arrived in time
    /// - [`ClientError::Network`] if the request failed at the transport level
    /// - [`ClientError::HttpStatus`] for statuses outside 200-299
    /// - [`ValidationError::JsonParse`] if the body is not valid JSON for `T`
    #[instrument(
        name = "api_request",
        skip(self, options),
        fields(
            http.method = %options.method,
            http.url = tracing::field::Empty,
            http.status_code = tracing::field::Empty,
            otel.kind = "client",
            otel.status_code = tracing::field::Empty,
        )
    )]
    pub async fn request<T>(&self, path: &str, options: RequestOptions) -> Result<ApiResponse<T>, ApiError>
    where
        T: DeserializeOwned,
    {
        let url = self.url_for(path)?;
        Span::current().record("http.url", url.as_str());

        let mut headers = self.headers.clone();
        for (name, value) in header_map(&options.headers)? {
            if let Some(name) = name {
                headers.insert(name, value);
            }
        }

        let mut request = self
            .client
            .request(options.method.into(), url)
            .headers(headers);
        match options.body {
            Some(body) if options.method.carries_body() => request = request.body(body),
            Some(_) => debug!("dropping body on a method that does not carry one"),
            None => {}
        }

        // One deadline bounds sending and reading the body.
        let deadline = Instant::now() + self.timeout;

        // Dropping the in-flight future on expiry aborts the request.
        let response = match tokio::time::timeout_at(deadline, request.send()).await {
            Ok(sent) => sent.map_err(ClientError::Network)?,
            Err(_) => return Err(self.timed_out()),
        };

        let status = response.status();
        let status_code = status.as_u16();
        let status_text = status.canonical_reason().unwrap_or_default().to_string();
        Span::current().record("http.status_code", status_code);

        if !status.is_success() {
            // Best effort: whatever arrives before the deadline.
            let body = match tokio::time::timeout_at(deadline, response.text()).await {
                Ok(text) => text.unwrap_or_default(),
                Err(_) => {
                    debug!(status = status_code, "error body not received before the deadline");
                    String::new()
                }
            };
            let otel_status = if status.is_server_error() { "ERROR" } else { "UNSET" };
            Span::current().record("otel.status_code", otel_status);
            debug!(status = status_code, "request failed with non-success status");

            return Err(ClientError::HttpStatus {
                status: status_code,
                status_text,
                body,
            }
            .into());
        }

        let body = match tokio::time::timeout_at(deadline, response.bytes()).await {
            Ok(read) => read.map_err(ClientError::Network)?,
            Err(_) => return Err(self.timed_out()),
        };
        let data = decode_json(&body)?;
        Span::current().record("otel.status_code", "OK");

        Ok(ApiResponse {
            data,
            status: status_code,
            status_text,
        })
    }

    /// Sends a `GET` request.
    pub async fn get<T>(&self, path: &str) -> Result<ApiResponse<T>, ApiError>
    where
        T: DeserializeOwned,
    {
        self.request(path, RequestOptions::new(RestMethod::Get)).await
    }

    /// Sends a `POST` request with `payload` serialized as JSON.
    pub async fn post<T, B>(&self, path: &str, payload: &B) -> Result<ApiResponse<T>, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send_json(RestMethod::Post, path, payload).await
    }

    /// Sends a `PUT` request with `payload` serialized as JSON.
    pub async fn put<T, B>(&self, path: &str, payload: &B) -> Result<ApiResponse<T>, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send_json(RestMethod::Put, path, payload).await
    }

    /// Sends a `PATCH` request with `payload` serialized as JSON.
    pub async fn patch<T, B>(&self, path: &str, payload: &B) -> Result<ApiResponse<T>, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send_json(RestMethod::Patch, path, payload).await
    }

    /// Sends a `DELETE` request.
    ///
    /// The response body must still be JSON; an empty `204` body is a decode error.
    pub async fn delete<T>(&self, path: &str) -> Result<ApiResponse<T>, ApiError>
    where
        T: DeserializeOwned,
    {
        self.request(path, RequestOptions::new(RestMethod::Delete)).await
    }

    fn timed_out(&self) -> ApiError {
        warn!(timeout_ms = self.timeout.as_millis() as u64, "request timed out");
        Span::current().record("otel.status_code", "ERROR");
        ClientError::Timeout { after: self.timeout }.into()
    }

    async fn send_json<T, B>(&self, method: RestMethod, path: &str, payload: &B) -> Result<ApiResponse<T>, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = serde_json::to_vec(payload).map_err(ValidationError::JsonEncode)?;
        self.request(path, RequestOptions::new(method).body(body)).await
    }

    /// Joins base URL and path by plain concatenation.
    fn url_for(&self, path: &str) -> Result<Url, ConfigError> {
        let raw = format!("{}{}", self.base_url, path);
        Url::parse(&raw).map_err(|source| ConfigError::InvalidUrl { url: raw, source })
    }
}

fn header_map(headers: &BTreeMap<String, String>) -> Result<HeaderMap, ConfigError> {
    let mut map = HeaderMap::with_capacity(headers.len());

    for (name, value) in headers {
        let header_name = HeaderName::try_from(name.as_str()).map_err(|e| ConfigError::InvalidHeader {
            name: name.clone(),
            message: e.to_string(),
        })?;
        let header_value = HeaderValue::try_from(value.as_str()).map_err(|e| ConfigError::InvalidHeader {
            name: name.clone(),
            message: e.to_string(),
        })?;
        map.insert(header_name, header_value);
    }

    Ok(map)
}
