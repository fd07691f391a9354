use thiserror::Error;

use super::{ClientError, ConfigError, ValidationError};

/// Top-level error for [`ApiClient`](crate::ApiClient) operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request could not be completed or the server refused it.
    #[error(transparent)]
    Client(#[from] ClientError),

    /// A payload could not be encoded or a response body could not be decoded.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The client or the request was configured with invalid values.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ApiError {
    /// Returns the HTTP status code when the server answered with a non-success status.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Client(ClientError::HttpStatus { status, .. }) => Some(*status),
            _ => None,
        }
    }

    /// Returns `true` when the request was aborted because it exceeded the timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Client(ClientError::Timeout { .. }))
    }

    /// Returns `true` for connection-level failures (DNS, refused, reset, TLS).
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Client(ClientError::Network(_)))
    }

    /// Returns `true` when a successful response carried a body that is not valid JSON for the target type.
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Validation(ValidationError::JsonParse(_)))
    }
}
