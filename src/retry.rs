//! Bounded retries with exponential backoff for outbound calls.

use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Attempts including the first one. Never below 1.
    pub max_attempts: u32,
    /// Pause before the first retry
    pub initial_delay: Duration,
    /// Upper bound for any single pause
    pub max_delay: Duration,
    /// Growth factor applied to the pause after each retry
    pub backoff_multiplier: f64,
}

impl RetryConfig {
    pub fn new(max_attempts: u32, initial_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            initial_delay,
            max_delay: Duration::from_secs(10),
            backoff_multiplier: 2.0,
        }
    }

    pub fn with_max_delay(mut self, max_delay: Duration) -> Self {
        self.max_delay = max_delay;
        self
    }

    /// Contact notification delivery: the visitor is waiting on the response,
    /// so pauses stay short.
    pub fn notification(max_attempts: u32) -> Self {
        Self::new(max_attempts, Duration::from_millis(500)).with_max_delay(Duration::from_secs(1))
    }

    /// Pause before retry number `retry` (1 for the first retry).
    pub fn delay_before_retry(&self, retry: u32) -> Duration {
        let exponent = retry.saturating_sub(1).min(i32::MAX as u32) as i32;
        let nanos = self.initial_delay.as_nanos() as f64 * self.backoff_multiplier.max(1.0).powi(exponent);
        if !nanos.is_finite() || nanos >= self.max_delay.as_nanos() as f64 {
            return self.max_delay;
        }
        Duration::from_nanos(nanos as u64)
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self::notification(2)
    }
}

/// Run `operation` until it succeeds, fails with an error `should_retry`
/// rejects, or the attempts run out. The last error is returned.
pub async fn with_retry_if<T, E, F, Fut, P>(
    config: &RetryConfig,
    operation_name: &str,
    mut operation: F,
    should_retry: P,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
    P: Fn(&E) -> bool,
{
    let attempts = config.max_attempts.max(1);
    let mut attempt = 1;

    loop {
        match operation().await {
            Ok(value) => {
                if attempt > 1 {
                    info!("{}: succeeded on attempt {}/{}", operation_name, attempt, attempts);
                }
                return Ok(value);
            }
            Err(e) if attempt < attempts && should_retry(&e) => {
                let delay = config.delay_before_retry(attempt);
                warn!(
                    "{}: attempt {}/{} failed ({}), retrying in {:?}",
                    operation_name, attempt, attempts, e, delay
                );
                sleep(delay).await;
                attempt += 1;
            }
            Err(e) => {
                if should_retry(&e) {
                    warn!("{}: giving up after {} attempts: {}", operation_name, attempts, e);
                } else {
                    debug!("{}: not retryable: {}", operation_name, e);
                }
                return Err(e);
            }
        }
    }
}
