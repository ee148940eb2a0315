//! Startup schema initialization with bounded retries.

use crate::services::store::{ItemStore, SeedOutcome, StoreError};
use metrics::counter;
use service_core::retry::{retry_with_config, RetryConfig};
use tracing::{error, info};

/// Result of the whole initialization phase.
#[derive(Debug)]
pub enum InitOutcome {
    Ready { attempts: u32, seed: SeedOutcome },
    /// Every attempt failed. The service keeps starting and reports unhealthy.
    Failed { attempts: u32, last_error: StoreError },
}

impl InitOutcome {
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready { .. })
    }

    pub fn attempts(&self) -> u32 {
        match self {
            Self::Ready { attempts, .. } | Self::Failed { attempts, .. } => *attempts,
        }
    }
}

/// Ensure the `items` table exists and is seeded, retrying per `retry`.
///
/// Never fails: exhaustion is logged and reported as [`InitOutcome::Failed`].
pub async fn initialize_store(store: &dyn ItemStore, retry: &RetryConfig) -> InitOutcome {
    let outcome = retry_with_config(retry, "initialize_items_table", |attempt| async move {
        let result = store.initialize().await;
        let label = match &result {
            Ok(_) => "ok",
            Err(e) => e.kind().as_str(),
        };
        counter!("items_init_attempts_total", "result" => label).increment(1);
        tracing::debug!(attempt, result = label, "Initialization attempt finished");
        result
    })
    .await;

    match outcome.result {
        Ok(seed) => {
            info!(attempts = outcome.attempts, ?seed, "Database initialized");
            InitOutcome::Ready {
                attempts: outcome.attempts,
                seed,
            }
        }
        Err(last_error) => {
            error!(
                attempts = outcome.attempts,
                error = %last_error,
                "Could not initialize database, starting without it"
            );
            InitOutcome::Failed {
                attempts: outcome.attempts,
                last_error,
            }
        }
    }
}
