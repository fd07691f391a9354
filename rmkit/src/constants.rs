//! Application-wide constants.

use std::time::Duration;

use strum::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};

pub const APP_NAME: &str = "RM MF Library";
pub const APP_VERSION: &str = "0.1.0";

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 100;

/// Milliseconds.
pub const DEFAULT_API_TIMEOUT: u64 = rmkit_api::DEFAULT_TIMEOUT_MS;
/// Milliseconds.
pub const DEBOUNCE_DELAY: u64 = 300;

pub const fn debounce_delay() -> Duration {
    Duration::from_millis(DEBOUNCE_DELAY)
}

/// Keys under which client state is persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr, IntoStaticStr, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum StorageKey {
    Theme,
    AuthToken,
    UserPreferences,
}

impl StorageKey {
    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}
