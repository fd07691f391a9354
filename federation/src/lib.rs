//! Shared-module registry for federated bundles.
//!
//! Independently built bundles agree on a single instance of each shared
//! dependency. A [`SharedRegistry`] holds one entry per module: the first
//! [`get`](SharedRegistry::get) runs the loader, every later or concurrent
//! request receives that same instance. A host may instead
//! [`provide`](SharedRegistry::provide) the instance up front.
//!
//! ## Examples
//!
//! ```rust,ignore
//! use rmkit_federation::{SharedModuleConfig, SharedRegistry};
//!
//! let registry = SharedRegistry::new();
//! registry.register(
//!     SharedModuleConfig::new("tailwindcss", "4.1.18", "RmMfLibrary").required_version("^4.1.18"),
//!     || async { Ok(TailwindRuntime::default()) },
//! )?;
//!
//! let tailwind = registry.get_as::<TailwindRuntime>("tailwindcss").await?;
//! ```

pub mod error;
pub mod manifest;
pub mod registry;

pub use error::{FederationError, Result};
pub use manifest::{FederationManifest, ShareConfig, SharedModuleConfig};
pub use registry::{LoadState, Loader, SharedInstance, SharedRegistry, global};
