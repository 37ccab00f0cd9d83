//! Reverse geocoding behind a process-wide rate limit.
//!
//! - **limiter**: periodic admission control shared by all workers
//! - **provider**: the `Geocoder` trait and the HTTP client
//! - **locator**: rate-limited retry loop around a geocoder
//! - **retry**: fixed attempt count and backoff

pub mod limiter;
pub mod locator;
pub mod provider;
pub mod retry;

pub use limiter::RateLimiter;
pub use locator::{LocateFailure, Locator};
pub use provider::{Geocoder, HttpGeocoder};
