//! Retry logic with linear backoff for provider and store operations.
//!
//! `RetryContext` wraps an async operation with bounded retries. Backoff before the
//! n-th retry is `n * base_delay` — a pure function of the attempt number, so retry
//! timing stays deterministic. Whether an error is worth retrying is decided by
//! `Error::to_retry_strategy()`; permanent failures return immediately.

use std::{future::Future, pin::Pin, time::Duration};

use crate::error::{retry::ErrorRetryStrategy, Error};

pub struct RetryContext {
    /// Maximum number of attempts before giving up
    max_attempts: u32,
    /// Backoff unit; attempt n sleeps n times this long
    base_delay_secs: u64,
}

impl RetryContext {
    const DEFAULT_MAX_ATTEMPTS: u32 = 3;
    const DEFAULT_BASE_DELAY_SECS: u64 = 1;

    /// Creates a retry context with 3 max attempts and a 1 second backoff unit.
    pub fn new() -> Self {
        Self {
            max_attempts: Self::DEFAULT_MAX_ATTEMPTS,
            base_delay_secs: Self::DEFAULT_BASE_DELAY_SECS,
        }
    }

    /// Creates a retry context with explicit bounds.
    pub fn with_config(max_attempts: u32, base_delay_secs: u64) -> Self {
        Self {
            max_attempts,
            base_delay_secs,
        }
    }

    /// Executes an operation with automatic retry and linear backoff.
    ///
    /// Runs `operation` up to `max_attempts` times. Transient failures sleep
    /// `attempt * base_delay` before the next try; permanent failures and the final
    /// exhausted attempt propagate the error to the caller.
    ///
    /// # Arguments
    /// - `description` - Human-readable label for logging (e.g. a provider name)
    /// - `operation` - Closure producing a fresh future per attempt
    pub async fn execute_with_retry<R, F>(
        &self,
        description: &str,
        operation: F,
    ) -> Result<R, Error>
    where
        F: Fn() -> Pin<Box<dyn Future<Output = Result<R, Error>> + Send>>,
    {
        let mut attempt_count = 0;

        loop {
            tracing::debug!(
                "Processing {} (attempt {}/{})",
                description,
                attempt_count + 1,
                self.max_attempts
            );

            match operation().await {
                Ok(result) => {
                    tracing::debug!("Successfully processed {}", description);
                    return Ok(result);
                }
                Err(e) => match e.to_retry_strategy() {
                    ErrorRetryStrategy::Fail => {
                        tracing::error!("Permanent error for {}: {:?}", description, e);
                        return Err(e);
                    }
                    ErrorRetryStrategy::Retry => {
                        attempt_count += 1;
                        if attempt_count >= self.max_attempts {
                            tracing::error!(
                                "Max attempts ({}) exceeded for {}: {:?}",
                                self.max_attempts,
                                description,
                                e
                            );
                            return Err(e);
                        }

                        let backoff =
                            Duration::from_secs(self.base_delay_secs * u64::from(attempt_count));

                        tracing::warn!(
                            "Retrying {} (attempt {}/{}) after {:?}: {:?}",
                            description,
                            attempt_count,
                            self.max_attempts,
                            backoff,
                            e
                        );

                        tokio::time::sleep(backoff).await;
                    }
                },
            }
        }
    }
}

impl Default for RetryContext {
    fn default() -> Self {
        Self::new()
    }
}
