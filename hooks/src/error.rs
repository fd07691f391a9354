use thiserror::Error;

/// Reasons a media query string cannot be understood.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MediaQueryError {
    #[error("media query is empty")]
    Empty,

    #[error("unsupported media type '{0}'")]
    UnknownMediaType(String),

    #[error("unsupported media feature '{0}'")]
    UnknownFeature(String),

    #[error("invalid value '{value}' for media feature '{feature}'")]
    InvalidValue { feature: String, value: String },

    #[error("malformed media query clause '{0}'")]
    Malformed(String),
}
