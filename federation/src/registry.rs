//! The singleton shared-module registry.

use std::any::{Any, type_name};
use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::sync::{Arc, LazyLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use futures::FutureExt;
use futures::future::BoxFuture;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use crate::error::{FederationError, Result};
use crate::manifest::{FederationManifest, SharedModuleConfig};

/// A type-erased shared module instance.
pub type SharedInstance = Arc<dyn Any + Send + Sync>;

/// Produces the bundled fallback instance of a shared module.
pub type Loader = Arc<dyn Fn() -> BoxFuture<'static, Result<SharedInstance>> + Send + Sync>;

/// Lifecycle of a registry entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum LoadState {
    Registered,
    Loaded,
}

struct Entry {
    config: SharedModuleConfig,
    loader: Option<Loader>,
    instance: OnceCell<SharedInstance>,
}

/// Holds at most one instance per shared module name.
///
/// The first [`get`](Self::get) of an entry runs its loader; concurrent
/// callers wait for that load and receive the same instance. A failed load
/// is not cached, so the next request retries it.
#[derive(Default)]
pub struct SharedRegistry {
    entries: RwLock<HashMap<String, Arc<Entry>>>,
}

impl SharedRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, Arc<Entry>>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, Arc<Entry>>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn entry(&self, name: &str) -> Result<Arc<Entry>> {
        self.read()
            .get(name)
            .cloned()
            .ok_or_else(|| FederationError::NotRegistered(name.to_string()))
    }

    fn check_versions(config: &SharedModuleConfig) -> Result<()> {
        let requirement = config.parsed_requirement()?;
        let bundled = config.parse_version(&config.version)?;

        if let Some(req) = &requirement
            && !req.matches(&bundled)
        {
            warn!(
                module = %config.name,
                version = %bundled,
                required = %req,
                "bundled fallback does not satisfy its own requirement"
            );
        }
        Ok(())
    }

    /// Inserts every entry or none of them.
    fn insert_all(&self, batch: Vec<(SharedModuleConfig, Option<Loader>)>) -> Result<()> {
        for (config, _) in &batch {
            Self::check_versions(config)?;
        }

        let mut entries = self.write();
        let mut seen = HashSet::with_capacity(batch.len());
        for (config, _) in &batch {
            if entries.contains_key(&config.name) || !seen.insert(config.name.as_str()) {
                return Err(FederationError::AlreadyRegistered(config.name.clone()));
            }
        }

        for (config, loader) in batch {
            debug!(module = %config.name, version = %config.version, from = %config.from, "shared module registered");
            entries.insert(
                config.name.clone(),
                Arc::new(Entry {
                    config,
                    loader,
                    instance: OnceCell::new(),
                }),
            );
        }
        Ok(())
    }

    fn insert(&self, config: SharedModuleConfig, loader: Option<Loader>) -> Result<()> {
        self.insert_all(vec![(config, loader)])
    }

    /// Registers a module with a bundled fallback loader.
    ///
    /// ## Errors
    ///
    /// Fails if the name is taken or either version string is not valid semver.
    pub fn register<F, Fut, T>(&self, config: SharedModuleConfig, load: F) -> Result<()>
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T>> + Send + 'static,
        T: Any + Send + Sync,
    {
        let loader: Loader = Arc::new(move || {
            let pending = load();
            async move { pending.await.map(|value| Arc::new(value) as SharedInstance) }.boxed()
        });
        self.insert(config, Some(loader))
    }

    /// Registers a module that only the host can supply.
    pub fn register_host_provided(&self, config: SharedModuleConfig) -> Result<()> {
        self.insert(config.host_provided(), None)
    }

    /// Registers every shared entry of `manifest`.
    ///
    /// Entries without a matching loader have no local fallback and must be
    /// [`provide`](Self::provide)d before use. If any entry is rejected,
    /// nothing from the manifest is registered.
    pub fn register_manifest(&self, manifest: &FederationManifest, mut loaders: HashMap<String, Loader>) -> Result<()> {
        let batch = manifest
            .shared
            .iter()
            .map(|config| (config.clone(), loaders.remove(&config.name)))
            .collect();
        self.insert_all(batch)?;

        for unused in loaders.keys() {
            warn!(module = %unused, "loader has no manifest entry");
        }
        Ok(())
    }

    /// Returns the module instance, loading the fallback on first use.
    ///
    /// ## Errors
    ///
    /// - [`FederationError::NotRegistered`] for an unknown name
    /// - [`FederationError::MustBeProvidedByHost`] when there is no fallback and nothing was provided
    /// - whatever the loader returned; the entry stays unloaded
    pub async fn get(&self, name: &str) -> Result<SharedInstance> {
        let entry = self.entry(name)?;

        let instance = entry
            .instance
            .get_or_try_init(|| async {
                let loader = entry
                    .loader
                    .as_ref()
                    .filter(|_| entry.config.import)
                    .ok_or_else(|| FederationError::MustBeProvidedByHost(name.to_string()))?;

                debug!(module = name, from = %entry.config.from, "loading shared module");
                let loaded = loader().await?;
                info!(module = name, version = %entry.config.version, "shared module loaded");
                Ok::<_, FederationError>(loaded)
            })
            .await?;

        Ok(Arc::clone(instance))
    }

    /// [`get`](Self::get) followed by a downcast to `T`.
    pub async fn get_as<T: Any + Send + Sync>(&self, name: &str) -> Result<Arc<T>> {
        self.get(name)
            .await?
            .downcast::<T>()
            .map_err(|_| FederationError::TypeMismatch {
                name: name.to_string(),
                expected: type_name::<T>(),
            })
    }

    /// Installs a host-supplied instance of `version`.
    ///
    /// A version outside the entry's requirement is logged, or rejected when
    /// the entry is marked `strict_version`.
    pub fn provide<T: Any + Send + Sync>(&self, name: &str, version: &str, instance: T) -> Result<()> {
        let entry = self.entry(name)?;
        let provided = entry.config.parse_version(version)?;

        if let Some(req) = entry.config.parsed_requirement()?
            && !req.matches(&provided)
        {
            if entry.config.share_config.strict_version {
                return Err(FederationError::VersionMismatch {
                    name: name.to_string(),
                    version: provided.to_string(),
                    required: req.to_string(),
                });
            }
            warn!(module = name, version = %provided, required = %req, "provided version does not satisfy requirement");
        }

        entry
            .instance
            .set(Arc::new(instance) as SharedInstance)
            .map_err(|_| FederationError::AlreadyLoaded(name.to_string()))?;

        info!(module = name, version = %provided, "shared module provided by host");
        Ok(())
    }

    pub fn state(&self, name: &str) -> Option<LoadState> {
        self.read().get(name).map(|entry| {
            if entry.instance.initialized() {
                LoadState::Loaded
            } else {
                LoadState::Registered
            }
        })
    }

    pub fn is_loaded(&self, name: &str) -> bool {
        self.state(name) == Some(LoadState::Loaded)
    }

    pub fn config(&self, name: &str) -> Option<SharedModuleConfig> {
        self.read().get(name).map(|entry| entry.config.clone())
    }

    /// Registered module names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.read().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }
}

impl std::fmt::Debug for SharedRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedRegistry").field("modules", &self.names()).finish()
    }
}

static GLOBAL: LazyLock<SharedRegistry> = LazyLock::new(SharedRegistry::new);

/// The process-wide registry.
pub fn global() -> &'static SharedRegistry {
    &GLOBAL
}
