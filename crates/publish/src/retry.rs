//! Bounded retry with exponential backoff for idempotent reads.
//!
//! Only transient failures ([`CoreError::is_transient`]) are retried. Publish
//! writes never go through here: a failed publish is resubmitted by the
//! caller.

use std::future::Future;
use std::time::Duration;

use vows_core::error::CoreError;

/// Default number of attempts, including the first.
pub const DEFAULT_READ_ATTEMPTS: u32 = 3;

/// Delay before the first retry; doubles on each subsequent one.
const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub base_delay: Duration,
}

impl RetryPolicy {
    pub fn new(attempts: u32, base_delay: Duration) -> Self {
        Self {
            attempts: attempts.max(1),
            base_delay,
        }
    }

    /// Single attempt, no retry.
    pub fn none() -> Self {
        Self::new(1, Duration::ZERO)
    }

    fn delay_for(&self, retry: u32) -> Duration {
        self.base_delay.saturating_mul(1 << retry.min(16))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_READ_ATTEMPTS, DEFAULT_BASE_DELAY)
    }
}

/// Run `op` until it succeeds, fails permanently, or attempts run out.
pub async fn retry_read<T, F, Fut>(
    policy: &RetryPolicy,
    operation: &'static str,
    mut op: F,
) -> Result<T, CoreError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, CoreError>>,
{
    let attempts = policy.attempts.max(1);
    let mut attempt = 1;
    loop {
        match op().await {
            Err(e) if e.is_transient() && attempt < attempts => {
                tracing::warn!(operation, attempt, error = %e, "Transient read failure, retrying");
                tokio::time::sleep(policy.delay_for(attempt - 1)).await;
                attempt += 1;
            }
            Err(e) => {
                if e.is_transient() {
                    tracing::error!(
                        operation,
                        attempts,
                        error = %e,
                        "Read failed after all retries",
                    );
                }
                return Err(e);
            }
            Ok(value) => return Ok(value),
        }
    }
}
