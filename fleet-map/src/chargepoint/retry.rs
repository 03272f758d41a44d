//! Bounded retry with exponential back-off.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use super::error::TransportError;

/// Runs `operation` up to `max_attempts` times.
///
/// After each failed attempt the error is logged and the task sleeps
/// `backoff * 2^(attempt - 1)` (1 s, 2 s, 4 s with a one-second base)
/// before retrying or giving up. The last error is returned once the
/// budget is spent. Every error is retried: timeouts, HTTP statuses and
/// SOAP faults alike.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_attempts: u32,
    backoff: Duration,
    mut operation: F,
) -> Result<T, TransportError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, TransportError>>,
{
    let max_attempts = max_attempts.max(1);
    let mut attempt = 0u32;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                attempt += 1;
                let delay = backoff.saturating_mul(1u32 << (attempt - 1).min(10));
                warn!(
                    attempt,
                    max_attempts,
                    delay_ms = delay.as_millis() as u64,
                    error = %err,
                    "HTTP/SOAP error"
                );
                tokio::time::sleep(delay).await;
                if attempt >= max_attempts {
                    return Err(err);
                }
            }
        }
    }
}
