use thiserror::Error;

/// JSON encoding and decoding failures.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// The response body is not valid JSON for the requested type.
    #[error("failed to parse JSON response: {0}")]
    JsonParse(#[source] serde_json::Error),

    /// The request payload could not be serialized.
    #[error("failed to encode JSON request body: {0}")]
    JsonEncode(#[source] serde_json::Error),
}
