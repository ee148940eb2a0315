//! Bounded retry with a configurable delay between attempts.
//!
//! Used for startup work that depends on a backing service which may still be
//! coming up (e.g. a database container started alongside the service).

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{error, info, warn};

/// Configuration for retry behavior.
#[derive(Clone, Debug, PartialEq)]
pub struct RetryConfig {
    /// Total number of attempts, including the first one.
    pub max_attempts: u32,
    /// Delay after the first failed attempt.
    pub initial_backoff: Duration,
    /// Upper bound for any single delay.
    pub max_backoff: Duration,
    /// Growth factor applied per failed attempt. `1.0` gives a fixed delay.
    pub backoff_multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self::fixed(5, Duration::from_secs(2))
    }
}

impl RetryConfig {
    /// Fixed delay between a bounded number of attempts.
    pub fn fixed(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            initial_backoff: delay,
            max_backoff: delay,
            backoff_multiplier: 1.0,
        }
    }

    /// A single attempt, no waiting.
    pub fn no_retry() -> Self {
        Self::fixed(1, Duration::ZERO)
    }

    /// Delay to wait after the given zero-based failed attempt.
    pub fn backoff_duration(&self, attempt: u32) -> Duration {
        let backoff =
            self.initial_backoff.as_millis() as f64 * self.backoff_multiplier.powi(attempt as i32);
        let backoff_ms = backoff.min(self.max_backoff.as_millis() as f64) as u64;
        Duration::from_millis(backoff_ms)
    }
}

/// Result of a retried operation.
#[derive(Debug)]
pub struct RetryOutcome<T, E> {
    /// Number of attempts actually made.
    pub attempts: u32,
    /// The successful value, or the error of the last attempt.
    pub result: Result<T, E>,
}

/// Run `f` until it succeeds or `config.max_attempts` is exhausted.
///
/// Sleeps between failed attempts but not after the last one. A
/// `max_attempts` of zero is treated as one.
pub async fn retry_with_config<F, Fut, T, E>(
    config: &RetryConfig,
    operation_name: &str,
    mut f: F,
) -> RetryOutcome<T, E>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let max_attempts = config.max_attempts.max(1);
    let mut attempt = 0;

    loop {
        match f(attempt + 1).await {
            Ok(value) => {
                if attempt > 0 {
                    info!(
                        operation = operation_name,
                        attempt = attempt + 1,
                        "Operation succeeded after retry"
                    );
                }
                return RetryOutcome {
                    attempts: attempt + 1,
                    result: Ok(value),
                };
            }
            Err(e) => {
                if attempt + 1 >= max_attempts {
                    error!(
                        operation = operation_name,
                        attempt = attempt + 1,
                        max_attempts = max_attempts,
                        error = %e,
                        "Operation failed after max attempts"
                    );
                    return RetryOutcome {
                        attempts: attempt + 1,
                        result: Err(e),
                    };
                }

                let backoff = config.backoff_duration(attempt);
                warn!(
                    operation = operation_name,
                    attempt = attempt + 1,
                    max_attempts = max_attempts,
                    error = %e,
                    backoff_ms = backoff.as_millis() as u64,
                    "Operation failed, retrying after backoff"
                );

                sleep(backoff).await;
                attempt += 1;
            }
        }
    }
}
