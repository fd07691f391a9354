//! Declarations of shared modules and remotes.

use semver::{Version, VersionReq};
use serde::{Deserialize, Serialize};

use crate::error::{FederationError, Result};

fn default_scope() -> Vec<String> {
    vec!["default".to_string()]
}

fn default_true() -> bool {
    true
}

/// Version negotiation settings for a shared module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareConfig {
    #[serde(default = "default_true")]
    pub singleton: bool,
    /// A semver requirement such as `^4.1.18`. `None` accepts any version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_version: Option<String>,
    /// Reject host-provided instances outside `required_version` instead of warning.
    #[serde(default)]
    pub strict_version: bool,
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            singleton: true,
            required_version: None,
            strict_version: false,
        }
    }
}

/// One shared module entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SharedModuleConfig {
    pub name: String,
    /// Version of the bundled fallback.
    pub version: String,
    #[serde(default = "default_scope")]
    pub scope: Vec<String>,
    /// Name of the bundle that ships the fallback.
    pub from: String,
    /// When `false` the host must supply the instance; there is no local fallback.
    #[serde(default = "default_true")]
    pub import: bool,
    #[serde(default)]
    pub share_config: ShareConfig,
}

impl SharedModuleConfig {
    pub fn new(name: impl Into<String>, version: impl Into<String>, from: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            scope: default_scope(),
            from: from.into(),
            import: true,
            share_config: ShareConfig::default(),
        }
    }

    pub fn required_version(mut self, requirement: impl Into<String>) -> Self {
        self.share_config.required_version = Some(requirement.into());
        self
    }

    pub fn strict_version(mut self, strict: bool) -> Self {
        self.share_config.strict_version = strict;
        self
    }

    /// Marks the entry as host-supplied.
    pub fn host_provided(mut self) -> Self {
        self.import = false;
        self
    }

    pub(crate) fn parsed_requirement(&self) -> Result<Option<VersionReq>> {
        self.share_config
            .required_version
            .as_deref()
            .map(|req| {
                VersionReq::parse(req).map_err(|source| FederationError::InvalidVersion {
                    name: self.name.clone(),
                    value: req.to_string(),
                    source,
                })
            })
            .transpose()
    }

    pub(crate) fn parse_version(&self, value: &str) -> Result<Version> {
        Version::parse(value).map_err(|source| FederationError::InvalidVersion {
            name: self.name.clone(),
            value: value.to_string(),
            source,
        })
    }
}

/// The set of shared modules and remotes a bundle was built against.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FederationManifest {
    #[serde(default)]
    pub shared: Vec<SharedModuleConfig>,
    #[serde(default)]
    pub remotes: Vec<String>,
}

impl FederationManifest {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn find(&self, name: &str) -> Option<&SharedModuleConfig> {
        self.shared.iter().find(|module| module.name == name)
    }
}
