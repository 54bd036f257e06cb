//! Linear backoff.

use std::time::Duration;

/// Delay to wait after the attempt with index `attempt` fails.
///
/// Attempt 0 waits nothing, so the first retry is immediate; later retries
/// wait `base * attempt`.
pub fn linear_backoff(base: Duration, attempt: u32) -> Duration {
    base.saturating_mul(attempt)
}
