//! Retry policy with jittered exponential backoff for rate-limited calls.

use std::future::Future;
use std::time::Duration;

use rand::Rng;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::domain::errors::{ApiError, ApiResult};
use crate::domain::models::RetryConfig;

/// Retry policy applied identically to all four upstream operations.
///
/// Only rate-limit errors are retried; the upstream is explicitly
/// rate-limited and expected to recover after a short cooldown. Delay for
/// attempt `n` is `base_delay * 2^n` with a random spread of
/// `±jitter * delay` per attempt.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum retry attempts after the initial call.
    max_retries: u32,
    /// Base backoff delay, doubled per attempt.
    base_delay: Duration,
    /// Fractional jitter applied per attempt (0.5 means ±50%).
    jitter: f64,
}

impl RetryPolicy {
    /// Create a new retry policy.
    pub fn new(max_retries: u32, base_delay: Duration, jitter: f64) -> Self {
        Self {
            max_retries,
            base_delay,
            jitter,
        }
    }

    /// Build a policy from the loaded configuration section.
    pub fn from_config(config: &RetryConfig) -> Self {
        Self::new(
            config.max_retries,
            Duration::from_millis(config.base_delay_ms),
            config.jitter,
        )
    }

    /// Execute an operation, retrying rate-limit failures.
    ///
    /// Non-retryable errors propagate on first occurrence. When the retry
    /// budget is spent the original error is replaced by a rate-limit error
    /// stating the exhaustion, with the last failure preserved as its cause.
    pub async fn execute<F, Fut, T>(&self, mut operation: F) -> ApiResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = ApiResult<T>>,
    {
        let mut attempt = 0;

        loop {
            match operation().await {
                Ok(value) => {
                    if attempt > 0 {
                        debug!(retries = attempt, "operation succeeded after retries");
                    }
                    return Ok(value);
                }
                Err(err) if !err.is_retryable() => return Err(err),
                Err(err) => {
                    if attempt >= self.max_retries {
                        warn!(
                            attempts = attempt + 1,
                            "retry budget exhausted, giving up"
                        );
                        return Err(ApiError::RateLimited {
                            message: format!(
                                "Retry budget exhausted after {} retries",
                                self.max_retries
                            ),
                            source: Some(Box::new(err)),
                        });
                    }

                    let delay = self.backoff_delay(attempt);
                    warn!(
                        attempt = attempt + 1,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "rate limited by upstream, backing off"
                    );
                    sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }

    /// Backoff for a given attempt: `base * 2^attempt`, jittered.
    fn backoff_delay(&self, attempt: u32) -> Duration {
        let base_ms = self.base_delay.as_millis() as f64 * 2_f64.powi(attempt as i32);
        let jittered_ms = if self.jitter > 0.0 {
            let spread = rand::thread_rng().gen_range(-self.jitter..=self.jitter);
            base_ms * (1.0 + spread)
        } else {
            base_ms
        };
        Duration::from_millis(jittered_ms.max(0.0).round() as u64)
    }
}

impl Default for RetryPolicy {
    /// Recommended defaults: 3 retries, 5 second base delay, ±50% jitter.
    fn default() -> Self {
        Self::new(3, Duration::from_secs(5), 0.5)
    }
}
