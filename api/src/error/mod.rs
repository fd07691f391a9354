//! Layered error types for the API client.
//!
//! The hierarchy lets callers branch on the failure without inspecting
//! message strings:
//! - [`ApiError`] - Top-level error returned by every client operation
//! - [`ClientError`] - Transport failures, timeouts and non-success statuses
//! - [`ValidationError`] - JSON encoding of payloads and decoding of bodies
//! - [`ConfigError`] - Invalid request URLs and header definitions

mod api_error;
mod client_error;
mod config_error;
mod validation_error;

pub use api_error::ApiError;
pub use client_error::ClientError;
pub use config_error::ConfigError;
pub use validation_error::ValidationError;
