use thiserror::Error;

/// Invalid client or request configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// `base_url + path` did not form a valid absolute URL.
    #[error("invalid request URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// A header name or value contains characters HTTP does not allow.
    #[error("invalid header '{name}': {message}")]
    InvalidHeader { name: String, message: String },
}
