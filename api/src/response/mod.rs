//! Decoded responses.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A completed request: the decoded JSON body plus the response status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub data: T,
    pub status: u16,
    /// Canonical reason phrase for `status`, not the phrase the server sent.
    pub status_text: String,
}

impl<T> ApiResponse<T> {
    /// Consumes the response and returns only the decoded body.
    pub fn into_data(self) -> T {
        self.data
    }

    /// Transforms the body while keeping status information.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResponse<U> {
        ApiResponse {
            data: f(self.data),
            status: self.status,
            status_text: self.status_text,
        }
    }
}

/// Parses a JSON body into `T`.
pub(crate) fn decode_json<T: DeserializeOwned>(body: &[u8]) -> Result<T, ValidationError> {
    serde_json::from_slice(body).map_err(ValidationError::JsonParse)
}
