//! Opt-in retry helper with exponential backoff and jitter.
//!
//! Retries are never automatic: call sites wrap idempotent operations
//! where transient network/timeout failures are plausible. Permanent
//! failures (malformed input, conflicts, parse errors) are returned on
//! the first attempt.

use std::future::Future;
use std::time::Duration;

use log::debug;
use rand::Rng;

use crate::error::{ApiError, Result, RetryClass};

pub const DEFAULT_MAX_ATTEMPTS: usize = 3;
const BASE_BACKOFF_MS: u64 = 250;
const MAX_BACKOFF_MS: u64 = 8_000;

/// Exponential backoff with jitter, capped.
fn backoff_with_jitter(attempt: usize) -> Duration {
    let exp = (attempt.saturating_sub(1) as u32).min(8);
    let backoff = (BASE_BACKOFF_MS.saturating_mul(1_u64 << exp)).min(MAX_BACKOFF_MS);
    let jitter = rand::thread_rng().gen_range(0..=(backoff / 5).max(1));
    Duration::from_millis(backoff.saturating_add(jitter))
}

/// Run `operation` up to `max_attempts` times, sleeping with exponential
/// backoff between retryable failures.
pub async fn retry_with_backoff<T, F, Fut>(max_attempts: usize, mut operation: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let max_attempts = max_attempts.max(1);
    let mut attempt = 0_usize;

    loop {
        attempt += 1;
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if err.retry_class() != RetryClass::Retryable || attempt >= max_attempts {
                    return Err(err);
                }
                let backoff = backoff_with_jitter(attempt);
                debug!(
                    "retry attempt {}/{} after {:?}: {}",
                    attempt + 1,
                    max_attempts,
                    backoff,
                    err
                );
                tokio::time::sleep(backoff).await;
            }
        }
    }
}
