//! Exponential backoff for transient storefront errors.
//!
//! Only 429 responses and network-level failures are retried. Everything else
//! (404, other statuses, bad JSON) is returned on the first attempt.

use std::future::Future;
use std::time::Duration;

use crate::error::ShopifyError;

fn is_retriable(err: &ShopifyError) -> bool {
    matches!(err, ShopifyError::RateLimited { .. } | ShopifyError::Http(_))
}

/// Runs `operation`, retrying retriable failures up to `max_retries` more times.
///
/// The wait before retry `n` (0-based) is `backoff_base_secs * 2^n` seconds,
/// so with a base of 2 and three retries the waits are 2s, 4s, 8s.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_secs: u64,
    mut operation: F,
) -> Result<T, ShopifyError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ShopifyError>>,
{
    let mut attempt = 0u32;

    loop {
        let err = match operation().await {
            Ok(value) => return Ok(value),
            Err(err) if !is_retriable(&err) || attempt >= max_retries => return Err(err),
            Err(err) => err,
        };

        let delay_secs = backoff_base_secs.saturating_mul(1u64 << attempt.min(62));
        tracing::warn!(
            attempt,
            max_retries,
            delay_secs,
            error = %err,
            "transient storefront error, retrying after backoff"
        );
        tokio::time::sleep(Duration::from_secs(delay_secs)).await;
        attempt += 1;
    }
}
