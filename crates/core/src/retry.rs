//! Bounded retry with exponential backoff for data source calls.

use std::future::Future;
use std::time::Duration;

use rodabem_shared::{DashboardConfig, RetryConfig};
use tracing::warn;

use crate::source::SourceError;

/// Retry policy applied to every collaborator call.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    max_attempts: u32,
    initial_delay: Duration,
    max_delay: Duration,
    multiplier: u32,
    attempt_timeout: Duration,
}

impl RetryPolicy {
    /// Creates a policy from explicit values.
    ///
    /// `max_attempts` is clamped to at least one.
    #[must_use]
    pub fn new(
        max_attempts: u32,
        initial_delay: Duration,
        max_delay: Duration,
        multiplier: u32,
        attempt_timeout: Duration,
    ) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            initial_delay,
            max_delay,
            multiplier: multiplier.max(1),
            attempt_timeout,
        }
    }

    /// Builds the policy from configuration.
    #[must_use]
    pub fn from_config(retry: &RetryConfig, dashboard: &DashboardConfig) -> Self {
        Self::new(
            retry.max_attempts,
            Duration::from_millis(retry.initial_delay_ms),
            Duration::from_millis(retry.max_delay_ms),
            retry.multiplier,
            dashboard.fetch_timeout(),
        )
    }

    /// A policy that tries once with the given timeout.
    #[must_use]
    pub fn no_retry(attempt_timeout: Duration) -> Self {
        Self::new(1, Duration::ZERO, Duration::ZERO, 1, attempt_timeout)
    }

    /// Total attempts this policy makes.
    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Delay to wait after the given zero-based failed attempt.
    #[must_use]
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = self.multiplier.saturating_pow(attempt);
        self.initial_delay.saturating_mul(factor).min(self.max_delay)
    }

    /// Runs `operation` until it succeeds, fails with a non-retryable error,
    /// or the attempts are exhausted. Each attempt is bounded by the timeout.
    pub async fn run<T, F, Fut>(&self, operation: &'static str, mut call: F) -> Result<T, SourceError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, SourceError>>,
    {
        let mut attempt = 0;
        loop {
            let result = match tokio::time::timeout(self.attempt_timeout, call()).await {
                Ok(result) => result,
                Err(_) => Err(SourceError::Timeout),
            };

            match result {
                Ok(value) => return Ok(value),
                Err(e) if e.is_retryable() && attempt + 1 < self.max_attempts => {
                    let delay = self.backoff(attempt);
                    warn!(
                        operation,
                        attempt = attempt + 1,
                        error = %e,
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        "Data source call failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&RetryConfig::default(), &DashboardConfig::default())
    }
}
