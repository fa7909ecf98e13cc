//! Retry with exponential backoff around a single remote call.

use crate::HarvestError;
use std::time::Duration;

/// How many extra attempts a transient failure gets, and how long to wait
/// before the first of them. The delay doubles on every retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::none()
    }
}

impl RetryPolicy {
    /// Fail on the first error.
    pub const fn none() -> Self {
        Self {
            max_retries: 0,
            backoff: Duration::ZERO,
        }
    }

    pub const fn new(max_retries: u32, backoff: Duration) -> Self {
        Self {
            max_retries,
            backoff,
        }
    }

    /// Delay before retry number `attempt` (1-based).
    pub fn delay(&self, attempt: u32) -> Duration {
        self.backoff
            .saturating_mul(2u32.saturating_pow(attempt.saturating_sub(1)))
    }

    /// Run `op` until it succeeds, fails permanently, or the retries run out.
    /// The last error is returned unchanged.
    pub fn run<T, F>(&self, mut op: F) -> Result<T, HarvestError>
    where
        F: FnMut() -> Result<T, HarvestError>,
    {
        let mut attempt = 0;
        loop {
            match op() {
                Ok(value) => return Ok(value),
                Err(err) if err.is_transient() && attempt < self.max_retries => {
                    attempt += 1;
                    let delay = self.delay(attempt);
                    tracing::warn!(error = %err, attempt, ?delay, "retrying facet query");
                    std::thread::sleep(delay);
                }
                Err(err) => return Err(err),
            }
        }
    }
}
