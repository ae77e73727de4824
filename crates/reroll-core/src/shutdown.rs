use std::sync::{Condvar, Mutex};
use std::time::Duration;

/// Cooperative cancellation signal with interruptible waits.
///
/// The reroll cycle sleeps a lot (settle delays, stability intervals); every
/// one of those sleeps goes through [`CancelToken::wait`] so that raising the
/// token takes effect immediately instead of after the current delay expires.
pub struct CancelToken {
    cancelled: Mutex<bool>,
    condvar: Condvar,
}

impl CancelToken {
    pub fn new() -> Self {
        Self {
            cancelled: Mutex::new(false),
            condvar: Condvar::new(),
        }
    }

    /// Raise the signal, waking every thread blocked in [`wait`](Self::wait).
    pub fn raise(&self) {
        match self.cancelled.lock() {
            Ok(mut cancelled) => *cancelled = true,
            Err(poisoned) => *poisoned.into_inner() = true,
        }
        self.condvar.notify_all();
    }

    /// Check the signal without blocking.
    pub fn is_cancelled(&self) -> bool {
        match self.cancelled.lock() {
            Ok(cancelled) => *cancelled,
            // A poisoned lock means a panicking thread; stop the run.
            Err(_) => true,
        }
    }

    /// Sleep for `duration` unless the signal is raised first.
    ///
    /// Returns `true` if cancellation was observed, `false` if the full
    /// duration elapsed.
    pub fn wait(&self, duration: Duration) -> bool {
        let Ok(guard) = self.cancelled.lock() else {
            return true;
        };
        if *guard {
            return true;
        }
        match self
            .condvar
            .wait_timeout_while(guard, duration, |cancelled| !*cancelled)
        {
            Ok((_, timeout)) => !timeout.timed_out(),
            Err(_) => true,
        }
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}
