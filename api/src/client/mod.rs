//! The HTTP client and its per-call options.

mod executor;
mod options;

pub use executor::{ApiClient, ApiClientBuilder};
pub use options::RequestOptions;
