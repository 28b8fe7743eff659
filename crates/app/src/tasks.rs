//! Background tasks owned by a controller.

use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::task::JoinHandle;

/// Set of spawned tasks that is aborted as a whole when dropped.
///
/// Controllers spawn every fire-and-forget job through their scope, so
/// dropping the controller cancels whatever is still pending.
#[derive(Debug, Default)]
pub struct TaskScope {
    handles: Mutex<Vec<JoinHandle<()>>>,
}

impl TaskScope {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn `future` on the current runtime and track it.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn spawn<F>(&self, future: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let handle = tokio::spawn(future);
        let mut handles = self.lock();
        handles.retain(|handle| !handle.is_finished());
        handles.push(handle);
    }

    /// Abort every tracked task.
    pub fn abort_all(&self) {
        for handle in self.lock().drain(..) {
            handle.abort();
        }
    }

    /// Number of tasks still running.
    #[must_use]
    pub fn active(&self) -> usize {
        self.lock().iter().filter(|handle| !handle.is_finished()).count()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<JoinHandle<()>>> {
        self.handles.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for TaskScope {
    fn drop(&mut self) {
        self.abort_all();
    }
}
