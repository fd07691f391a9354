use std::time::Duration;

use thiserror::Error;

/// Failures that happen while talking to the server.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The underlying HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),

    /// The request never produced a response (DNS, connect, TLS, reset, body read).
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    /// No response arrived before the configured timeout and the request was aborted.
    #[error("request aborted after {after:?} timeout")]
    Timeout {
        /// The timeout that elapsed.
        after: Duration,
    },

    /// The server answered outside the 2xx range.
    #[error("HTTP error! status: {status}")]
    HttpStatus {
        /// Numeric status code.
        status: u16,
        /// Canonical reason phrase for the status, empty when unknown. A custom
        /// phrase sent by the server is not preserved.
        status_text: String,
        /// Raw response body, empty when it could not be read before the deadline.
        body: String,
    },
}
