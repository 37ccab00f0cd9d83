//! Configuration validation with range checks.

use crate::error::ConfigError;

use super::Config;

impl Config {
    /// Validate configuration values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.processing.supported_formats.is_empty() {
            return Err(ConfigError::ValidationError(
                "processing.supported_formats must not be empty".into(),
            ));
        }
        if self.watermark.font_size < 0.0 || !self.watermark.font_size.is_finite() {
            return Err(ConfigError::ValidationError(
                "watermark.font_size must be >= 0 (0 = auto)".into(),
            ));
        }
        if self.watermark.font_name.is_empty() {
            return Err(ConfigError::ValidationError(
                "watermark.font_name must not be empty".into(),
            ));
        }
        if self.geocoder.endpoint.is_empty() {
            return Err(ConfigError::ValidationError(
                "geocoder.endpoint must not be empty".into(),
            ));
        }
        if self.geocoder.rate_per_second == 0 {
            return Err(ConfigError::ValidationError(
                "geocoder.rate_per_second must be > 0".into(),
            ));
        }
        if self.geocoder.timeout_ms == 0 {
            return Err(ConfigError::ValidationError(
                "geocoder.timeout_ms must be > 0".into(),
            ));
        }
        if self.output.quality == 0 || self.output.quality > 100 {
            return Err(ConfigError::ValidationError(
                "output.quality must be between 1 and 100".into(),
            ));
        }
        if self.output.dir_name.is_empty() {
            return Err(ConfigError::ValidationError(
                "output.dir_name must not be empty".into(),
            ));
        }
        Ok(())
    }
}
