//! Fixed retry policy for reverse-geocoding lookups.

use std::time::Duration;

/// Total attempts per coordinate pair before the file fails.
pub const MAX_ATTEMPTS: u32 = 3;

/// Base delay for the backoff between attempts.
pub const BASE_DELAY_MS: u64 = 250;

/// Upper bound for any single backoff.
const MAX_DELAY_MS: u64 = 2_000;

/// Calculate exponential backoff duration before retry number `attempt`.
///
/// Uses `base_delay * 2^attempt` capped at two seconds. The rate limiter
/// still spaces the attempts on top of this.
pub fn backoff_duration(attempt: u32, base_delay_ms: u64) -> Duration {
    let delay = base_delay_ms.saturating_mul(2u64.saturating_pow(attempt));
    Duration::from_millis(delay.min(MAX_DELAY_MS))
}
