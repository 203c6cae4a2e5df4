use std::thread::sleep;
use std::time::Duration;

use tracing::{info, warn};

use crate::storage::SinkError;

/// Passive observer of chunk commit retries.
pub trait RetryObserver: Send + Sync {
    /// Called once when a commit retry sequence concludes after at least one retry,
    /// with the number of retries made.
    fn on_retry_exhausted(&self, attempt_count: u32);
}

/// Logs the retry count of every commit that needed a retry.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingRetryObserver;

impl RetryObserver for LoggingRetryObserver {
    fn on_retry_exhausted(&self, attempt_count: u32) {
        info!("Retry count: {attempt_count}");
    }
}

/// A commit that did not succeed within the retry budget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryFailure {
    pub attempts: u32,
    pub error: SinkError
}

/// Bounded retry of transient commit failures with a fixed backoff.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    max_retries: u32,
    backoff: Duration
}

impl RetryPolicy {
    pub fn new(max_retries: u32, backoff: Duration) -> Self {
        Self { max_retries, backoff }
    }

    /// Runs `operation` until it succeeds, fails with a non-transient error,
    /// or has been retried `max_retries` times.
    pub fn run<T, F>(&self, observer: &dyn RetryObserver, mut operation: F) -> Result<T, RetryFailure>
    where
        F: FnMut() -> Result<T, SinkError>
    {
        let mut retries = 0u32;

        let result = loop {
            match operation() {
                Ok(value) => break Ok(value),
                Err(error) if error.is_transient() && retries < self.max_retries => {
                    retries += 1;
                    warn!(attempt = retries, max_retries = self.max_retries, "{error}, will retry");

                    if !self.backoff.is_zero() {
                        sleep(self.backoff);
                    }
                }
                Err(error) => break Err(RetryFailure { attempts: retries + 1, error })
            }
        };

        if retries > 0 {
            observer.on_retry_exhausted(retries);
        }

        result
    }
}
