//! Trailing-edge debouncing.

use std::future::Future;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use tokio::task::JoinHandle;

/// Default quiet period before a debounced task runs.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Runs a task once its trigger has been quiet for a fixed delay.
///
/// Owns at most one pending task. Scheduling a new one cancels the pending
/// one, so a burst of triggers runs only the last task. Once the delay has
/// elapsed the task is detached: later triggers no longer cancel it.
///
/// Must be used inside a tokio runtime. Dropping the debouncer cancels the
/// pending task.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Mutex::new(None),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedule `task` to run after the quiet period, replacing any pending
    /// task.
    pub fn schedule<F>(&self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let delay = self.delay;
        let timer = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            tokio::spawn(task);
        });

        if let Some(previous) = self.slot().replace(timer) {
            previous.abort();
        }
    }

    /// Cancel the pending task, if any. Returns whether one was pending.
    pub fn cancel(&self) -> bool {
        match self.slot().take() {
            Some(timer) => {
                let pending = !timer.is_finished();
                timer.abort();
                pending
            }
            None => false,
        }
    }

    /// Whether a task is waiting for its quiet period to end.
    pub fn is_pending(&self) -> bool {
        self.slot().as_ref().is_some_and(|timer| !timer.is_finished())
    }

    fn slot(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.pending.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        if let Some(timer) = self.slot().take() {
            timer.abort();
        }
    }
}
