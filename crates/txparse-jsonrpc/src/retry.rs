//! Retry policy for JSON-RPC requests
//!
//! Only transient failures are retried; the caller decides which errors qualify.

use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;

/// Retry policy configuration
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of retry attempts (0 = no retries, just try once)
    pub max_retries: u32,

    /// Initial backoff duration
    pub initial_backoff: Duration,

    /// Maximum backoff duration
    pub max_backoff: Duration,

    /// Backoff multiplier (e.g., 2.0 for exponential backoff)
    pub backoff_multiplier: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::no_retry()
    }
}

impl RetryPolicy {
    pub fn new(
        max_retries: u32,
        initial_backoff: Duration,
        max_backoff: Duration,
        backoff_multiplier: f64,
    ) -> Self {
        Self {
            max_retries,
            initial_backoff,
            max_backoff,
            backoff_multiplier,
        }
    }

    /// Creates a policy with no retries (fail immediately).
    pub fn no_retry() -> Self {
        Self {
            max_retries: 0,
            initial_backoff: Duration::ZERO,
            max_backoff: Duration::ZERO,
            backoff_multiplier: 1.0,
        }
    }

    /// Runs `operation`, retrying with exponential backoff while `is_transient` accepts
    /// the error and attempts remain.
    ///
    /// Returns the first success, the first non-transient error, or the last error once
    /// retries are exhausted.
    pub async fn execute<F, Fut, T, E>(
        &self,
        mut operation: F,
        is_transient: impl Fn(&E) -> bool,
    ) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: std::fmt::Display,
    {
        let mut attempts = 0;
        let mut backoff = self.initial_backoff;

        loop {
            match operation().await {
                Ok(result) => {
                    if attempts > 0 {
                        tracing::info!(
                            target: "txparse_jsonrpc::retry",
                            attempts = attempts + 1,
                            "Request succeeded after retrying"
                        );
                    }
                    return Ok(result);
                }
                Err(err) if !is_transient(&err) => return Err(err),
                Err(err) => {
                    attempts += 1;

                    if attempts > self.max_retries {
                        if self.max_retries > 0 {
                            tracing::error!(
                                target: "txparse_jsonrpc::retry",
                                attempts,
                                error = %err,
                                "Request failed, retries exhausted"
                            );
                        }
                        return Err(err);
                    }

                    tracing::warn!(
                        target: "txparse_jsonrpc::retry",
                        attempt = attempts,
                        max_attempts = self.max_retries + 1,
                        error = %err,
                        backoff = ?backoff,
                        "Request failed, backing off"
                    );

                    sleep(backoff).await;

                    backoff = Duration::from_secs_f64(
                        (backoff.as_secs_f64() * self.backoff_multiplier)
                            .min(self.max_backoff.as_secs_f64()),
                    );
                }
            }
        }
    }
}
