/// Errors raised by the shared-module registry.
#[derive(Debug, thiserror::Error)]
pub enum FederationError {
    #[error("shared module '{0}' is already registered")]
    AlreadyRegistered(String),

    #[error("shared module '{0}' is not registered")]
    NotRegistered(String),

    /// The entry is marked as host-supplied and the host has not supplied it.
    #[error("shared module '{0}' must be provided by host")]
    MustBeProvidedByHost(String),

    #[error("shared module '{0}' is already loaded")]
    AlreadyLoaded(String),

    #[error("shared module '{name}' version {version} does not satisfy {required}")]
    VersionMismatch {
        name: String,
        version: String,
        required: String,
    },

    #[error("invalid version '{value}' for shared module '{name}': {source}")]
    InvalidVersion {
        name: String,
        value: String,
        #[source]
        source: semver::Error,
    },

    #[error("shared module '{name}' is not a {expected}")]
    TypeMismatch { name: String, expected: &'static str },

    #[error("failed to load shared module '{name}': {message}")]
    LoadFailed { name: String, message: String },

    #[error("invalid federation manifest: {0}")]
    Manifest(#[from] serde_json::Error),
}

/// Convenience Result type for registry operations.
pub type Result<T> = std::result::Result<T, FederationError>;

impl FederationError {
    /// Wraps an arbitrary loader failure for `name`.
    pub fn load_failed(name: impl Into<String>, error: impl std::fmt::Display) -> Self {
        Self::LoadFailed {
            name: name.into(),
            message: error.to_string(),
        }
    }
}
