//! Single entry point for the shared client library.
//!
//! Each group is re-exported as a module so consumers can depend on one
//! crate and import only what they use:
//!
//! - [`services`]: the HTTP [`ApiClient`](services::ApiClient)
//! - [`types`]: wire shapes shared with the backend
//! - [`utils`]: formatting and validation helpers
//! - [`hooks`]: live media-query subscriptions
//! - [`federation`]: the shared-module registry
//! - [`constants`]: application-wide constants
//!
//! [`config`] and [`telemetry`] wire these together for an application.

pub mod config;
pub mod constants;
pub mod error;
pub mod telemetry;

pub use rmkit_api as services;
pub use rmkit_federation as federation;
pub use rmkit_hooks as hooks;
pub use rmkit_types as types;
pub use rmkit_utils as utils;

pub use config::KitConfig;
pub use error::{ConfigError, KitError, Result};
