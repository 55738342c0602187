//! Retry mechanism with backoff

use super::types::{BackoffStrategy, RetryConfig, Retryable};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, error, warn};

/// Retry policy with a configurable backoff schedule
#[derive(Debug, Clone, Default)]
pub struct RetryPolicy {
    config: RetryConfig,
}

impl RetryPolicy {
    /// Create a new retry policy
    pub fn new(config: RetryConfig) -> Self {
        Self { config }
    }

    /// Policy that makes a single attempt
    pub fn no_retry() -> Self {
        Self::new(RetryConfig {
            max_attempts: 1,
            ..RetryConfig::default()
        })
    }

    pub fn config(&self) -> &RetryConfig {
        &self.config
    }

    /// Total number of attempts, never less than one
    pub fn max_attempts(&self) -> u32 {
        self.config.max_attempts.max(1)
    }

    /// Delay to sleep after the given failed attempt (1-based)
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let attempt = attempt.max(1);
        let base = self.config.base_delay_ms as f64;

        let delay_ms = match self.config.backoff {
            BackoffStrategy::Linear => base * attempt as f64,
            BackoffStrategy::Exponential => {
                base * self.config.backoff_multiplier.powi(attempt as i32 - 1)
            }
            BackoffStrategy::Constant => base,
        };

        let delay_ms = if self.config.jitter {
            let jitter_factor = 0.1;
            delay_ms + delay_ms * jitter_factor * (rand::random::<f64>() - 0.5) * 2.0
        } else {
            delay_ms
        };

        let capped = delay_ms.min(self.config.max_delay_ms as f64).max(0.0);
        Duration::from_millis(capped as u64)
    }

    /// Sum of all delays slept when every attempt fails
    pub fn total_backoff(&self) -> Duration {
        (1..self.max_attempts()).map(|i| self.delay_for(i)).sum()
    }

    /// Run `operation` until it succeeds, fails with a non-retryable error,
    /// or the attempts are exhausted. The closure receives the 1-based
    /// attempt number. No delay follows the final attempt.
    pub async fn run<F, Fut, T, E>(&self, label: &str, mut operation: F) -> Result<T, E>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Retryable + std::fmt::Display,
    {
        let max_attempts = self.max_attempts();
        let mut attempt = 1;

        loop {
            match operation(attempt).await {
                Ok(result) => {
                    if attempt > 1 {
                        debug!("{} succeeded on attempt {}", label, attempt);
                    }
                    return Ok(result);
                }
                Err(err) if !err.is_retryable() => {
                    debug!("{} failed with non-retryable error: {}", label, err);
                    return Err(err);
                }
                Err(err) => {
                    if attempt >= max_attempts {
                        error!("{} failed after {} attempts: {}", label, attempt, err);
                        return Err(err);
                    }

                    let delay = self.delay_for(attempt);
                    warn!(
                        "{} attempt {}/{} failed: {}, retrying in {:?}",
                        label, attempt, max_attempts, err, delay
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}
