//! Application configuration loaded from TOML.
//!
//! ```toml
//! [api]
//! base_url = "https://api.example.com"
//! timeout_ms = 5000
//!
//! [api.headers]
//! X-Tenant = "acme"
//!
//! [pagination]
//! default_page_size = 25
//!
//! [logging]
//! verbosity = 1
//! json = true
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use rmkit_api::{ApiClient, ApiClientConfig};

use crate::constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::error::{ConfigError, KitError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    pub default_page_size: u32,
    pub max_page_size: u32,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: MAX_PAGE_SIZE,
        }
    }
}

impl PaginationConfig {
    /// Clamps a requested page size into `1..=max_page_size`, using the default for `None`.
    pub fn page_size(&self, requested: Option<u32>) -> u32 {
        requested
            .unwrap_or(self.default_page_size)
            .clamp(1, self.max_page_size.max(1))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 0 = warn, 1 = info, 2 = debug, 3+ = trace. `RUST_LOG` takes precedence.
    pub verbosity: u8,
    pub json: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KitConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api: Option<ApiClientConfig>,
    pub pagination: PaginationConfig,
    pub logging: LoggingConfig,
}

impl KitConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        debug!(path = %path.display(), "loading config");
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(api) = &self.api {
            if !rmkit_utils::is_valid_url(&api.base_url) {
                return Err(ConfigError::InvalidBaseUrl(api.base_url.clone()));
            }
            if api.timeout_ms == Some(0) {
                return Err(ConfigError::ZeroTimeout);
            }
        }

        let PaginationConfig {
            default_page_size,
            max_page_size,
        } = self.pagination;
        if default_page_size == 0 || default_page_size > max_page_size {
            return Err(ConfigError::PageSize {
                default: default_page_size,
                max: max_page_size,
            });
        }

        Ok(())
    }

    /// Builds a client from the `[api]` section.
    pub fn api_client(&self) -> Result<ApiClient, KitError> {
        let api = self.api.clone().ok_or(ConfigError::MissingApi)?;
        Ok(ApiClient::new(api)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = KitConfig::from_toml_str("").unwrap();
        assert_eq!(config, KitConfig::default());
        assert_eq!(config.pagination.default_page_size, 20);
        assert_eq!(config.pagination.max_page_size, 100);
        assert!(matches!(config.api_client(), Err(KitError::Config(ConfigError::MissingApi))));
    }

    #[test]
    fn test_full_config() {
        let config = KitConfig::from_toml_str(
            r#"
            [api]
            base_url = "https://api.example.com"
            timeout_ms = 2500

            [api.headers]
            X-Tenant = "acme"

            [pagination]
            default_page_size = 50

            [logging]
            verbosity = 2
            json = true
            "#,
        )
        .unwrap();

        let api = config.api.as_ref().unwrap();
        assert_eq!(api.timeout(), Duration::from_millis(2500));
        assert_eq!(
            api.resolved_headers().get("X-Tenant").map(String::as_str),
            Some("acme")
        );
        assert_eq!(config.pagination.default_page_size, 50);
        assert_eq!(config.pagination.max_page_size, 100);
        assert_eq!(config.logging, LoggingConfig { verbosity: 2, json: true });

        let client = config.api_client().unwrap();
        assert_eq!(client.timeout(), Duration::from_millis(2500));
    }

    #[test]
    fn test_validation_failures() {
        assert!(matches!(
            KitConfig::from_toml_str("[api]\nbase_url = \"not a url\""),
            Err(ConfigError::InvalidBaseUrl(_))
        ));
        assert!(matches!(
            KitConfig::from_toml_str("[api]\nbase_url = \"http://x.test\"\ntimeout_ms = 0"),
            Err(ConfigError::ZeroTimeout)
        ));
        assert!(matches!(
            KitConfig::from_toml_str("[pagination]\ndefault_page_size = 200"),
            Err(ConfigError::PageSize { default: 200, max: 100 })
        ));
        assert!(matches!(
            KitConfig::from_toml_str("[pagination]\ndefault_page_size = 0"),
            Err(ConfigError::PageSize { .. })
        ));
        assert!(matches!(
            KitConfig::from_toml_str("[api]\ntimeout_ms = 10"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_page_size_clamping() {
        let pagination = PaginationConfig::default();
        assert_eq!(pagination.page_size(None), 20);
        assert_eq!(pagination.page_size(Some(0)), 1);
        assert_eq!(pagination.page_size(Some(500)), 100);
        assert_eq!(pagination.page_size(Some(42)), 42);
    }

    #[test]
    fn test_missing_file() {
        let err = KitConfig::load_from_file("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
