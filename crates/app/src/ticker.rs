//! Periodic background refresh.

use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

/// Shortest period a ticker will run at. Smaller periods, zero included, are
/// raised to this.
pub const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Runs a job every `period` until stopped.
///
/// The first run happens one full period after [`Ticker::start`]. A tick
/// waits for the previous job to finish, so runs never overlap. Stopping
/// aborts the loop, including a sleep that is in progress.
#[derive(Debug)]
pub struct Ticker {
    period: Duration,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl Ticker {
    #[must_use]
    pub fn new(period: Duration) -> Self {
        Self {
            period: period.max(MIN_PERIOD),
            handle: Mutex::new(None),
        }
    }

    /// Start ticking, replacing any loop already running.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn start<F, Fut>(&self, mut job: F)
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let period = self.period;
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                job().await;
            }
        });

        if let Some(previous) = self.lock().replace(handle) {
            previous.abort();
        }
    }

    /// Stop ticking. Returns whether a loop was running.
    pub fn stop(&self) -> bool {
        self.lock().take().is_some_and(|handle| {
            handle.abort();
            true
        })
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.lock().as_ref().is_some_and(|handle| !handle.is_finished())
    }

    fn lock(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.handle.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.stop();
    }
}
