use std::path::PathBuf;

/// Problems with a [`KitConfig`](crate::KitConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("config has no [api] section")]
    MissingApi,

    #[error("invalid api.base_url '{0}'")]
    InvalidBaseUrl(String),

    #[error("api.timeout_ms must be greater than zero")]
    ZeroTimeout,

    #[error("pagination.default_page_size ({default}) must be between 1 and max_page_size ({max})")]
    PageSize { default: u32, max: u32 },
}

/// Top-level error for the barrel crate.
#[derive(Debug, thiserror::Error)]
pub enum KitError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Api(#[from] rmkit_api::ApiError),

    #[error(transparent)]
    Federation(#[from] rmkit_federation::FederationError),

    #[error("failed to install tracing subscriber: {0}")]
    Telemetry(String),
}

pub type Result<T> = std::result::Result<T, KitError>;
