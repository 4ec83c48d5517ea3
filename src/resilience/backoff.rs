//! Delay between provider attempts.

use rand::Rng;
use std::time::Duration;

use crate::config::RetryConfig;

/// Delay before the next provider attempt.
///
/// `failed_attempts` counts attempts already made. The delay doubles from
/// `base_delay_ms` per failure, is capped at `max_delay_ms`, and gets up to
/// 10% jitter so parallel start/end lookups do not retry in lockstep.
pub fn retry_delay(failed_attempts: u32, config: &RetryConfig) -> Duration {
    let Some(exponent) = failed_attempts.checked_sub(1) else {
        return Duration::ZERO;
    };

    let delay_ms = config
        .base_delay_ms
        .saturating_mul(2u64.saturating_pow(exponent))
        .min(config.max_delay_ms);

    let jitter_ms = match delay_ms / 10 {
        0 => 0,
        spread => rand::thread_rng().gen_range(0..spread),
    };

    Duration::from_millis(delay_ms + jitter_ms)
}
