//! JSON-over-HTTP client shared by consuming applications.
//!
//! [`ApiClient`] issues one request per call against `base_url + path`,
//! bounded by a timeout, and reports failures through the layered
//! [`ApiError`] so callers can tell a timeout from a refused connection,
//! a non-success status or an undecodable body.
//!
//! ## Examples
//!
//! ```rust,ignore
//! use rmkit_api::{ApiClient, ApiClientConfig};
//! use std::time::Duration;
//!
//! let client = ApiClient::new(
//!     ApiClientConfig::new("https://api.example.com").with_timeout(Duration::from_secs(5)),
//! )?;
//!
//! match client.get::<serde_json::Value>("/health").await {
//!     Ok(response) => println!("{} {}", response.status, response.data),
//!     Err(e) if e.is_timeout() => eprintln!("gave up waiting"),
//!     Err(e) => eprintln!("request failed: {e}"),
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod method;
pub mod response;

pub use client::{ApiClient, ApiClientBuilder, RequestOptions};
pub use config::{ApiClientConfig, DEFAULT_TIMEOUT_MS};
pub use error::{ApiError, ClientError, ConfigError, ValidationError};
pub use method::RestMethod;
pub use response::ApiResponse;
