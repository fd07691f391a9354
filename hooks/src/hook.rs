//! The subscriber-side handle for a single media query.

use std::sync::Arc;

use tokio::sync::watch;

use crate::environment::{ListenerId, MediaEnvironment};
use crate::error::MediaQueryError;
use crate::query::MediaQuery;

/// Live match state of one media query.
///
/// The listener registered in the [`MediaEnvironment`] belongs to this
/// handle: it is removed before a replacement is registered by
/// [`set_query`](Self::set_query), and removed when the handle is dropped.
#[derive(Debug)]
pub struct MediaQueryHook {
    env: Arc<MediaEnvironment>,
    query: MediaQuery,
    id: ListenerId,
    rx: watch::Receiver<bool>,
}

/// Subscribes to `query`, reading its current state immediately.
///
/// ## Errors
///
/// Returns an error if `query` cannot be parsed; nothing is registered then.
pub fn use_media_query(env: &Arc<MediaEnvironment>, query: &str) -> Result<MediaQueryHook, MediaQueryError> {
    let query = MediaQuery::parse(query)?;
    let (id, rx) = env.add_listener(query.clone());

    Ok(MediaQueryHook {
        env: Arc::clone(env),
        query,
        id,
        rx,
    })
}

impl MediaQueryHook {
    /// Whether the query matches right now.
    pub fn matches(&self) -> bool {
        *self.rx.borrow()
    }

    pub fn query(&self) -> &MediaQuery {
        &self.query
    }

    /// Waits for the next change of the match state and returns the new value.
    ///
    /// Returns `None` once the listener has been removed from the
    /// environment; no further changes will arrive.
    pub async fn changed(&mut self) -> Option<bool> {
        self.rx.changed().await.ok()?;
        Some(*self.rx.borrow_and_update())
    }

    /// A receiver other tasks can await independently of this handle.
    ///
    /// It stops receiving updates once this handle is dropped or re-pointed.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.rx.clone()
    }

    /// Points the handle at a different query.
    ///
    /// Identical query text is a no-op. An unparseable query leaves the
    /// current subscription untouched.
    pub fn set_query(&mut self, query: &str) -> Result<(), MediaQueryError> {
        if query.trim() == self.query.as_str() {
            return Ok(());
        }

        let next = MediaQuery::parse(query)?;

        self.env.remove_listener(self.id);
        let (id, rx) = self.env.add_listener(next.clone());

        self.query = next;
        self.id = id;
        self.rx = rx;
        Ok(())
    }
}

impl Drop for MediaQueryHook {
    fn drop(&mut self) {
        self.env.remove_listener(self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{ColorScheme, Viewport};
    use std::time::Duration;

    fn desktop() -> Arc<MediaEnvironment> {
        Arc::new(MediaEnvironment::new(Viewport::new(1280, 800)))
    }

    #[test]
    fn test_initial_state_is_read_on_activation() {
        let env = desktop();
        let hook = use_media_query(&env, "(min-width: 1024px)").unwrap();

        assert!(hook.matches());
        assert_eq!(env.listener_count(), 1);
    }

    #[test]
    fn test_drop_deregisters() {
        let env = desktop();
        {
            let _a = use_media_query(&env, "(min-width: 1px)").unwrap();
            let _b = use_media_query(&env, "(max-width: 1px)").unwrap();
            assert_eq!(env.listener_count(), 2);
        }
        assert_eq!(env.listener_count(), 0);
    }

    #[test]
    fn test_invalid_query_registers_nothing() {
        let env = desktop();
        assert!(use_media_query(&env, "(min-width: huge)").is_err());
        assert_eq!(env.listener_count(), 0);
    }

    #[test]
    fn test_set_query_swaps_the_listener() {
        let env = desktop();
        let mut hook = use_media_query(&env, "(prefers-color-scheme: dark)").unwrap();
        assert!(!hook.matches());

        hook.set_query("(orientation: landscape)").unwrap();
        assert!(hook.matches());
        assert_eq!(env.listener_count(), 1);

        env.update_viewport(|v| v.color_scheme = ColorScheme::Dark);
        assert!(hook.matches());
    }

    #[test]
    fn test_set_query_failure_keeps_old_subscription() {
        let env = desktop();
        let mut hook = use_media_query(&env, "(min-width: 1000px)").unwrap();

        assert!(hook.set_query("(min-width: ???)").is_err());
        assert_eq!(hook.query().as_str(), "(min-width: 1000px)");
        assert_eq!(env.listener_count(), 1);

        env.update_viewport(|v| v.width = 800);
        assert!(!hook.matches());
    }

    #[test]
    fn test_same_query_is_a_noop() {
        let env = desktop();
        let mut hook = use_media_query(&env, "(min-width: 1000px)").unwrap();
        let before = hook.id;

        hook.set_query(" (min-width: 1000px) ").unwrap();
        assert_eq!(hook.id, before);
    }

    #[tokio::test]
    async fn test_changed_wakes_on_flip() {
        let env = desktop();
        let mut hook = use_media_query(&env, "(max-width: 600px)").unwrap();
        assert!(!hook.matches());

        let resizer = {
            let env = Arc::clone(&env);
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(10)).await;
                env.update_viewport(|v| v.width = 400);
            })
        };

        let now = tokio::time::timeout(Duration::from_secs(2), hook.changed())
            .await
            .unwrap();
        assert_eq!(now, Some(true));
        resizer.await.unwrap();
    }

    #[tokio::test]
    async fn test_changed_ends_when_listener_is_gone() {
        let env = desktop();
        let mut hook = use_media_query(&env, "(max-width: 600px)").unwrap();

        assert!(env.remove_listener(hook.id));
        let next = tokio::time::timeout(Duration::from_secs(2), hook.changed())
            .await
            .unwrap();
        assert_eq!(next, None);
    }

    #[tokio::test]
    async fn test_replaced_subscription_stops_updating() {
        let env = desktop();
        let mut hook = use_media_query(&env, "(max-width: 600px)").unwrap();
        let old = hook.subscribe();

        hook.set_query("(min-width: 600px)").unwrap();
        env.update_viewport(|v| v.width = 400);

        assert!(!*old.borrow());
        assert!(old.has_changed().is_err());
        assert!(!hook.matches());
    }
}
