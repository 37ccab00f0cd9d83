//! Rate-limited, retrying front end for a [`Geocoder`].

use std::sync::Arc;
use std::time::Duration;

use super::limiter::RateLimiter;
use super::provider::Geocoder;
use super::retry;
use crate::error::GeocodeError;
use crate::types::Coordinates;

/// Failure after every attempt was used up.
#[derive(Debug)]
pub struct LocateFailure {
    pub attempts: u32,
    pub last_error: GeocodeError,
}

/// Wraps a geocoder with the shared rate limiter and bounded retry.
///
/// Every attempt, including retries, performs exactly one `take()` on the
/// limiter before calling the provider.
#[derive(Clone)]
pub struct Locator {
    geocoder: Arc<dyn Geocoder>,
    limiter: Arc<RateLimiter>,
    max_attempts: u32,
    base_delay_ms: u64,
}

impl Locator {
    pub fn new(geocoder: Arc<dyn Geocoder>, limiter: Arc<RateLimiter>) -> Self {
        Self {
            geocoder,
            limiter,
            max_attempts: retry::MAX_ATTEMPTS,
            base_delay_ms: retry::BASE_DELAY_MS,
        }
    }

    /// Shared limiter handle (for reporting and tests).
    pub fn limiter(&self) -> &Arc<RateLimiter> {
        &self.limiter
    }

    /// Resolve coordinates to a locality, retrying on any failure.
    pub async fn locate(&self, coords: Coordinates) -> Result<String, LocateFailure> {
        let mut last_error = None;

        for attempt in 0..self.max_attempts {
            if attempt > 0 {
                let delay = retry::backoff_duration(attempt - 1, self.base_delay_ms);
                if delay > Duration::ZERO {
                    tokio::time::sleep(delay).await;
                }
            }

            self.limiter.take().await;
            match self.geocoder.lookup(coords).await {
                Ok(locality) => return Ok(locality),
                Err(e) => {
                    tracing::warn!(
                        "Geocode attempt {}/{} via {} failed: {}",
                        attempt + 1,
                        self.max_attempts,
                        self.geocoder.name(),
                        e
                    );
                    last_error = Some(e);
                }
            }
        }

        Err(LocateFailure {
            attempts: self.max_attempts,
            last_error: last_error.unwrap_or(GeocodeError::MissingLocality),
        })
    }
}
