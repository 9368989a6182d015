use std::fmt::Display;
use std::time::Duration;
use tokio::time::sleep;
use tracing::warn;

/// Backoff schedule: one delay per `base_delays` entry, then
/// `final_retries` more attempts spaced by `final_delay`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    pub base_delays: Vec<Duration>,
    pub final_retries: usize,
    pub final_delay: Duration,
}

impl RetryPolicy {
    /// A single attempt.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            base_delays: Vec::new(),
            final_retries: 0,
            final_delay: Duration::ZERO,
        }
    }

    /// Total attempts, never less than one.
    #[must_use]
    pub fn attempts(&self) -> usize {
        (self.base_delays.len() + self.final_retries).max(1)
    }

    fn delay_after(&self, attempt: usize) -> Duration {
        self.base_delays
            .get(attempt - 1)
            .copied()
            .unwrap_or(self.final_delay)
    }
}

impl Default for RetryPolicy {
    /// Short enough to fit inside a summarization call timeout.
    fn default() -> Self {
        Self {
            base_delays: vec![Duration::from_millis(250), Duration::from_millis(500)],
            final_retries: 1,
            final_delay: Duration::from_secs(1),
        }
    }
}

/// Retry an async operation following `policy`.
///
/// # Returns
/// The result of the operation if successful, or the last error if all retries fail
pub async fn retry_with_backoff<F, Fut, T, E>(mut operation: F, policy: &RetryPolicy) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, E>>,
    E: Display,
{
    let attempts = policy.attempts();
    let mut attempt = 1;
    loop {
        match operation().await {
            Ok(result) => return Ok(result),
            Err(e) if attempt >= attempts => return Err(e),
            Err(e) => {
                let delay = policy.delay_after(attempt);
                warn!("Request failed (attempt {attempt}/{attempts}): {e}. Retrying after {delay:?}...");
                sleep(delay).await;
                attempt += 1;
            }
        }
    }
}
