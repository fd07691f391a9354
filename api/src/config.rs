//! Client configuration.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default request timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Header sent with every request unless overridden.
pub const DEFAULT_CONTENT_TYPE: (&str, &str) = ("Content-Type", "application/json");

/// Settings an [`ApiClient`](crate::ApiClient) is constructed from.
///
/// Only `base_url` is required. A missing timeout means
/// [`DEFAULT_TIMEOUT_MS`]; `headers` are layered over the JSON content type.
///
/// ## Examples
///
/// ```rust
/// use rmkit_api::ApiClientConfig;
/// use std::time::Duration;
///
/// let config = ApiClientConfig::new("https://api.example.com")
///     .with_timeout(Duration::from_secs(2))
///     .with_header("X-Tenant", "acme");
///
/// assert_eq!(config.timeout(), Duration::from_secs(2));
/// assert_eq!(config.resolved_headers().get("Content-Type").map(String::as_str), Some("application/json"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiClientConfig {
    pub base_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<BTreeMap<String, String>>,
}

impl ApiClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_ms: None,
            headers: None,
        }
    }

    /// Sets the timeout. Sub-millisecond precision is dropped.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = Some(timeout.as_millis().try_into().unwrap_or(u64::MAX));
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), value.into());
        self
    }

    /// The effective timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms.unwrap_or(DEFAULT_TIMEOUT_MS))
    }

    /// Default headers overlaid with the configured ones.
    ///
    /// Names compare case-insensitively, so `content-type` replaces the
    /// default `Content-Type`.
    pub fn resolved_headers(&self) -> BTreeMap<String, String> {
        let mut resolved = BTreeMap::new();
        resolved.insert(DEFAULT_CONTENT_TYPE.0.to_string(), DEFAULT_CONTENT_TYPE.1.to_string());

        for (name, value) in self.headers.iter().flatten() {
            resolved.retain(|existing: &String, _| !existing.eq_ignore_ascii_case(name));
            resolved.insert(name.clone(), value.clone());
        }

        resolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ApiClientConfig::new("https://example.com");
        assert_eq!(config.timeout(), Duration::from_millis(10_000));

        let headers = config.resolved_headers();
        assert_eq!(headers.len(), 1);
        assert_eq!(headers["Content-Type"], "application/json");
    }

    #[test]
    fn test_configured_headers_merge_with_defaults() {
        let config = ApiClientConfig::new("https://example.com").with_header("Authorization", "Bearer t");
        let headers = config.resolved_headers();

        assert_eq!(headers["Content-Type"], "application/json");
        assert_eq!(headers["Authorization"], "Bearer t");
    }

    #[test]
    fn test_content_type_override_is_case_insensitive() {
        let config = ApiClientConfig::new("https://example.com").with_header("content-type", "text/plain");
        let headers = config.resolved_headers();

        assert_eq!(headers.len(), 1);
        assert_eq!(headers["content-type"], "text/plain");
    }

    #[test]
    fn test_deserialize_minimal() {
        let config: ApiClientConfig = serde_json::from_str(r#"{"base_url": "http://localhost:8080"}"#).unwrap();
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.timeout_ms, None);
        assert_eq!(config.headers, None);
    }
}
