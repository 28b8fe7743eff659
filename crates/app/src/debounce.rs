//! Cancel-and-reschedule trigger.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::tasks::TaskScope;

/// Runs an action once triggers have been quiet for a fixed window.
///
/// Each [`Debouncer::trigger`] supersedes the one before it. A superseded
/// timer wakes up, sees it is stale and exits without running its action.
/// Once an action has started it is left to finish, so a later trigger never
/// interrupts a request half way; dropping the debouncer aborts everything.
#[derive(Debug)]
pub struct Debouncer {
    window: Duration,
    generation: Arc<AtomicU64>,
    tasks: TaskScope,
}

impl Debouncer {
    #[must_use]
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            generation: Arc::new(AtomicU64::new(0)),
            tasks: TaskScope::new(),
        }
    }

    /// Schedule `action` to run after the quiet window, replacing any
    /// pending trigger.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn trigger<F, Fut>(&self, action: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let current = Arc::clone(&self.generation);
        let window = self.window;

        self.tasks.spawn(async move {
            tokio::time::sleep(window).await;
            if current.load(Ordering::SeqCst) != generation {
                return;
            }
            action().await;
        });
    }

    /// Drop the pending trigger, if any. Actions already running continue.
    pub fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }
}
