use super::NarrativeFailure;
use std::future::Future;
use std::time::Duration;
use tracing::warn;

/// Exponential backoff applied to transient narrative failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub initial_backoff: Duration,
}

impl RetryPolicy {
    pub fn new(max_retries: u32, initial_backoff: Duration) -> Self {
        Self {
            max_retries,
            initial_backoff,
        }
    }

    /// Delay before retry number `retry` (0-based): `initial * 2^retry`.
    pub fn delay_for(&self, retry: u32) -> Duration {
        self.initial_backoff
            .saturating_mul(2u32.saturating_pow(retry))
    }

    /// Runs `operation` until it succeeds, fails permanently, or the retry
    /// budget is spent. The closure receives the 0-based attempt number.
    pub async fn run<F, Fut, T>(&self, mut operation: F) -> Result<T, NarrativeFailure>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, NarrativeFailure>>,
    {
        let mut attempt = 0;
        loop {
            match operation(attempt).await {
                Ok(value) => return Ok(value),
                Err(failure) if failure.is_transient() && attempt < self.max_retries => {
                    let delay = self.delay_for(attempt);
                    warn!(
                        attempt = attempt + 1,
                        delay_ms = delay.as_millis() as u64,
                        error = %failure,
                        "narrative attempt failed; backing off"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(failure) => return Err(failure),
            }
        }
    }
}
