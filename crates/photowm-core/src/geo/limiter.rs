//! Periodic rate limiter for the shared reverse-geocoding dependency.
//!
//! Unlike a token bucket, admissions are spaced at least `min_interval`
//! apart with no burst allowance: under sustained load the grant schedule is
//! strictly periodic. The throttled caller sleeps while holding the lock, so
//! no other worker can be admitted until that wait has elapsed.
//!
//! ```text
//!   take()  ──►  lock ──► wait = min_interval - (now - last)
//!                           │
//!                 wait > 0 ─┤─► sleep(wait), last = now + wait
//!                 else      └─► last = now
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// Enforces a minimum spacing between grants across all callers.
///
/// Construct one per process and share it behind an `Arc`; every worker and
/// every geocoding attempt goes through the same instance.
#[derive(Debug)]
pub struct RateLimiter {
    min_interval: Duration,
    last: Mutex<Option<Instant>>,
    takes: AtomicU64,
}

impl RateLimiter {
    /// Create a limiter admitting at most `rate_per_second` calls per second.
    ///
    /// A rate of zero is treated as unlimited.
    pub fn new(rate_per_second: u32) -> Self {
        if rate_per_second == 0 {
            return Self::with_interval(Duration::ZERO);
        }
        Self::with_interval(Duration::from_secs(1) / rate_per_second)
    }

    /// Create a limiter with an explicit minimum interval between grants.
    pub fn with_interval(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last: Mutex::new(None),
            takes: AtomicU64::new(0),
        }
    }

    /// A limiter that never waits. Grants are still counted.
    pub fn unlimited() -> Self {
        Self::with_interval(Duration::ZERO)
    }

    /// Wait until a call may proceed and return the granted timestamp.
    ///
    /// The next caller's wait is computed from the returned timestamp, not
    /// from whenever this task is actually rescheduled after sleeping.
    pub async fn take(&self) -> Instant {
        let mut last = self.last.lock().await;
        self.takes.fetch_add(1, Ordering::Relaxed);

        let now = Instant::now();
        let granted = match *last {
            None => now,
            Some(prev) => {
                let elapsed = now.saturating_duration_since(prev);
                if elapsed < self.min_interval {
                    let wait = self.min_interval - elapsed;
                    tracing::trace!("Rate limiter sleeping {:?}", wait);
                    tokio::time::sleep(wait).await;
                    now + wait
                } else {
                    now
                }
            }
        };

        *last = Some(granted);
        granted
    }

    /// Minimum spacing between consecutive grants.
    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Number of `take()` calls made so far.
    pub fn takes(&self) -> u64 {
        self.takes.load(Ordering::Relaxed)
    }
}
