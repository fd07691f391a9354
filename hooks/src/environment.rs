//! The viewport host that evaluates queries and dispatches change events.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;
use tracing::{debug, trace};

use crate::error::MediaQueryError;
use crate::query::{MediaQuery, Viewport};

/// Handle for a registered change listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

struct Listener {
    query: MediaQuery,
    tx: watch::Sender<bool>,
}

struct Inner {
    viewport: Viewport,
    next_id: u64,
    listeners: HashMap<ListenerId, Listener>,
}

/// Owns the current [`Viewport`] and the listeners watching it.
///
/// Listeners are only notified when their own match state flips, never for
/// viewport changes that leave it unchanged.
pub struct MediaEnvironment {
    inner: Mutex<Inner>,
}

impl MediaEnvironment {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            inner: Mutex::new(Inner {
                viewport,
                next_id: 0,
                listeners: HashMap::new(),
            }),
        }
    }

    // Listener bookkeeping stays valid even if a holder panicked.
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn viewport(&self) -> Viewport {
        self.lock().viewport
    }

    /// One-off evaluation of a query against the current viewport.
    pub fn match_media(&self, query: &str) -> Result<bool, MediaQueryError> {
        let query = MediaQuery::parse(query)?;
        Ok(query.matches(&self.lock().viewport))
    }

    /// Replaces the viewport and returns how many listeners saw their state flip.
    pub fn set_viewport(&self, viewport: Viewport) -> usize {
        self.update_viewport(|current| *current = viewport)
    }

    /// Mutates the viewport in place and returns how many listeners saw their state flip.
    pub fn update_viewport(&self, update: impl FnOnce(&mut Viewport)) -> usize {
        let mut inner = self.lock();
        update(&mut inner.viewport);

        let viewport = inner.viewport;
        let mut notified = 0;

        for (id, listener) in &inner.listeners {
            let now_matches = listener.query.matches(&viewport);
            let flipped = listener.tx.send_if_modified(|current| {
                if *current == now_matches {
                    return false;
                }
                *current = now_matches;
                true
            });

            if flipped {
                debug!(listener = id.0, query = %listener.query, matches = now_matches, "media query changed");
                notified += 1;
            }
        }

        notified
    }

    /// Registers a listener and returns the receiver seeded with the current match state.
    pub fn add_listener(&self, query: MediaQuery) -> (ListenerId, watch::Receiver<bool>) {
        let mut inner = self.lock();

        let id = ListenerId(inner.next_id);
        inner.next_id += 1;

        let (tx, rx) = watch::channel(query.matches(&inner.viewport));
        trace!(listener = id.0, query = %query, "media listener added");
        inner.listeners.insert(id, Listener { query, tx });

        (id, rx)
    }

    /// Deregisters a listener. Returns `false` if it was not registered.
    pub fn remove_listener(&self, id: ListenerId) -> bool {
        let removed = self.lock().listeners.remove(&id).is_some();
        if removed {
            trace!(listener = id.0, "media listener removed");
        }
        removed
    }

    pub fn listener_count(&self) -> usize {
        self.lock().listeners.len()
    }
}

impl std::fmt::Debug for MediaEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.lock();
        f.debug_struct("MediaEnvironment")
            .field("viewport", &inner.viewport)
            .field("listeners", &inner.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_flipped_listeners_are_notified() {
        let env = MediaEnvironment::new(Viewport::new(1024, 768));
        let (_, wide) = env.add_listener(MediaQuery::parse("(min-width: 768px)").unwrap());
        let (_, tall) = env.add_listener(MediaQuery::parse("(min-height: 500px)").unwrap());

        assert!(*wide.borrow());
        assert!(*tall.borrow());

        let notified = env.update_viewport(|v| v.width = 500);
        assert_eq!(notified, 1);
        assert!(!*wide.borrow());
        assert!(*tall.borrow());
    }

    #[test]
    fn test_unchanged_state_is_not_dispatched() {
        let env = MediaEnvironment::new(Viewport::new(1024, 768));
        let (_, rx) = env.add_listener(MediaQuery::parse("(min-width: 768px)").unwrap());

        assert_eq!(env.set_viewport(Viewport::new(1280, 800)), 0);
        assert!(!rx.has_changed().unwrap());
    }

    #[test]
    #[tracing_test::traced_test]
    fn test_flip_is_logged() {
        let env = MediaEnvironment::new(Viewport::new(1024, 768));
        let (_, _rx) = env.add_listener(MediaQuery::parse("(orientation: portrait)").unwrap());

        env.set_viewport(Viewport::new(768, 1024));
        assert!(logs_contain("media query changed"));
    }

    #[test]
    fn test_remove_listener() {
        let env = MediaEnvironment::new(Viewport::new(100, 100));
        let (id, _rx) = env.add_listener(MediaQuery::parse("all").unwrap());

        assert_eq!(env.listener_count(), 1);
        assert!(env.remove_listener(id));
        assert!(!env.remove_listener(id));
        assert_eq!(env.listener_count(), 0);
    }

    #[test]
    fn test_match_media() {
        let env = MediaEnvironment::new(Viewport::new(320, 640));
        assert_eq!(env.match_media("(orientation: portrait)"), Ok(true));
        assert!(env.match_media("(bogus: 1)").is_err());
    }
}
