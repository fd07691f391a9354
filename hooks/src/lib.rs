//! Media-condition subscriptions.
//!
//! A [`MediaEnvironment`] plays the role of the browser window: it knows the
//! current [`Viewport`] and notifies listeners whose [`MediaQuery`] flips
//! when the viewport changes. [`use_media_query`] hands out a
//! [`MediaQueryHook`] that keeps a live `bool` for one query and
//! unregisters itself when dropped or re-pointed at another query.
//!
//! ## Examples
//!
//! ```rust
//! use std::sync::Arc;
//! use rmkit_hooks::{MediaEnvironment, Viewport, use_media_query};
//!
//! let env = Arc::new(MediaEnvironment::new(Viewport::new(1024, 768)));
//! let wide = use_media_query(&env, "(min-width: 768px)").unwrap();
//! assert!(wide.matches());
//!
//! env.update_viewport(|v| v.width = 640);
//! assert!(!wide.matches());
//!
//! drop(wide);
//! assert_eq!(env.listener_count(), 0);
//! ```

pub mod environment;
pub mod error;
pub mod hook;
pub mod query;

pub use environment::{ListenerId, MediaEnvironment};
pub use error::MediaQueryError;
pub use hook::{MediaQueryHook, use_media_query};
pub use query::{ColorScheme, MediaQuery, Viewport};
