//! Back-off for the venue gateway.
//!
//! Timeouts, refused connections, 5xx and 429 from the venue data service are
//! repeated after a pause. Everything else goes straight back to the caller.

use std::future::Future;
use std::time::Duration;

use crate::error::VenueError;

/// Returns `true` for errors that are worth retrying after a back-off delay.
///
/// **Retriable:** timeouts, connection failures, HTTP 5xx and 429.
///
/// **Not retriable:** other 4xx statuses, deserialization and payload
/// validation errors, a bad base URL.
pub(crate) fn is_retriable(err: &VenueError) -> bool {
    match err {
        VenueError::Http(e) => {
            e.is_timeout() || e.is_connect() || e.status().is_some_and(|s| s.is_server_error())
        }
        VenueError::UnexpectedStatus { status, .. } => *status >= 500 || *status == 429,
        VenueError::Deserialize { .. }
        | VenueError::InvalidPayload { .. }
        | VenueError::InvalidBaseUrl { .. } => false,
    }
}

/// Longest pause between two venue requests, before jitter.
const MAX_BACKOFF_MS: u64 = 5_000;

/// Pause before the `retry`-th repeat (1-based).
///
/// Doubles from `backoff_base_ms` per retry up to [`MAX_BACKOFF_MS`], then
/// gets scaled by a random factor in `0.75..=1.25`.
fn backoff_delay(retry: u32, backoff_base_ms: u64) -> Duration {
    let doublings = retry.saturating_sub(1).min(10);
    let ceiling = backoff_base_ms
        .saturating_mul(1u64 << doublings)
        .min(MAX_BACKOFF_MS);
    let spread: f64 = rand::random_range(0.75..=1.25);
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    let millis = (ceiling as f64 * spread) as u64;
    Duration::from_millis(millis)
}

/// Calls `operation` until it succeeds, fails permanently, or `max_retries`
/// repeats have been spent on transient failures.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_ms: u64,
    mut operation: F,
) -> Result<T, VenueError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, VenueError>>,
{
    let mut retries = 0u32;
    loop {
        let transient = match operation().await {
            Ok(value) => return Ok(value),
            Err(err) if retries < max_retries && is_retriable(&err) => err,
            Err(err) => return Err(err),
        };

        retries += 1;
        let delay = backoff_delay(retries, backoff_base_ms);
        tracing::warn!(
            retry = retries,
            max_retries,
            delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
            error = %transient,
            "venue gateway request failed transiently; backing off"
        );
        tokio::time::sleep(delay).await;
    }
}
