//! Retry logic.
//!
//! # Responsibilities
//! - Decide whether a failure is transient (via [`Transient`])
//! - Re-run the operation with exponential backoff + jitter
//! - Stop after `max_attempts`
//!
//! # Design Decisions
//! - Provider calls are idempotent GETs, so any transient failure may be retried
//! - A provider-level "no result" answer is a success at this layer
//! - Connection errors and timeouts always retryable; 5xx and 429 too

use std::future::Future;

use crate::config::RetryConfig;
use crate::resilience::backoff::retry_delay;

/// Classifies errors that are worth another attempt.
pub trait Transient {
    fn is_transient(&self) -> bool;
}

/// Run `op` until it succeeds, fails permanently, or attempts run out.
///
/// `label` names the operation in logs.
pub async fn retry_transient<T, E, F, Fut>(config: &RetryConfig, label: &str, mut op: F) -> Result<T, E>
where
    E: Transient + std::fmt::Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let max_attempts = if config.enabled { config.max_attempts.max(1) } else { 1 };
    let mut attempts = 0;

    loop {
        attempts += 1;
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if attempts < max_attempts && e.is_transient() => {
                let delay = retry_delay(attempts, config);
                tracing::info!(
                    operation = label,
                    attempt = attempts,
                    delay = ?delay,
                    error = %e,
                    "Retrying after transient failure"
                );
                tokio::time::sleep(delay).await;
            }
            Err(e) => return Err(e),
        }
    }
}
