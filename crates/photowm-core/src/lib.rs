//! photowm core - batch photo watermarking library.
//!
//! Each photo is decoded, optionally downscaled, rotated upright from its
//! EXIF orientation, stamped with its capture time and (when it carries GPS
//! coordinates) a reverse-geocoded place name, then re-encoded as JPEG.
//!
//! # Architecture
//!
//! ```text
//! paths → queue → N workers → decode → resize → EXIF → orient → geocode → watermark → encode
//!                                                                  │
//!                                                       shared RateLimiter
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use photowm_core::{Config, Dispatcher, PhotoPipeline, ProcessOptions};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> photowm_core::Result<()> {
//!     let config = Config::load()?;
//!     let options = ProcessOptions::from_config(&config, "./photos/out".into());
//!     let pipeline = Arc::new(PhotoPipeline::from_config(&config, options)?);
//!
//!     let dispatcher = Dispatcher::new(pipeline, config.processing.worker_count());
//!     let stats = dispatcher
//!         .run(vec!["./photos/a.jpg".into()], |outcome| println!("{:?}", outcome.path))
//!         .await;
//!     println!("{} ok, {} failed", stats.succeeded, stats.failed);
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod config;
pub mod error;
pub mod geo;
pub mod pipeline;
pub mod types;

// Re-exports for convenient access
pub use config::Config;
pub use error::{
    ConfigError, FontError, GeocodeError, PhotowmError, PipelineError, PipelineResult, Result,
};
pub use geo::{Geocoder, HttpGeocoder, Locator, RateLimiter};
pub use pipeline::{Compositor, Dispatcher, FileDiscovery, PhotoPipeline, ProcessOptions};
pub use types::{Coordinates, PhotoMetadata, ProcessedPhoto, ProcessingOutcome, ProcessingStats};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
