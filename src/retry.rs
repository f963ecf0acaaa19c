//! Bounded retry with a fixed pause between attempts.

use std::future::Future;
use std::time::Duration;

/// How often an operation is attempted and how long to wait in between
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    attempts: u32,
    delay: Duration,
}

impl RetryPolicy {
    /// `attempts` counts the initial try; zero is treated as one
    pub fn new(attempts: u32, delay: Duration) -> Self {
        Self {
            attempts: attempts.max(1),
            delay,
        }
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Call after `attempt` (1-based) failed. Returns false when no attempts
    /// remain, otherwise waits out the delay and returns true.
    pub async fn before_retry(&self, attempt: u32) -> bool {
        if attempt >= self.attempts {
            return false;
        }
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        true
    }

    /// Runs `operation` until it succeeds or the attempts are used up,
    /// reporting every failure to `on_failure` with its 1-based attempt
    /// number. The last error is returned on exhaustion.
    pub async fn run<T, E, F, Fut, L>(&self, mut operation: F, mut on_failure: L) -> Result<T, E>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        L: FnMut(u32, &E),
    {
        let mut attempt = 1;
        loop {
            match operation(attempt).await {
                Ok(value) => return Ok(value),
                Err(e) => {
                    on_failure(attempt, &e);
                    if !self.before_retry(attempt).await {
                        return Err(e);
                    }
                    attempt += 1;
                }
            }
        }
    }
}
