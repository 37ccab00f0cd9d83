//! Sub-configuration structs with their defaults.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Processing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingConfig {
    /// Number of parallel workers (0 = host available parallelism)
    pub parallel_workers: usize,

    /// File extensions picked up by directory discovery
    pub supported_formats: Vec<String>,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            parallel_workers: 0,
            supported_formats: vec!["jpg".to_string(), "jpeg".to_string()],
        }
    }
}

impl ProcessingConfig {
    /// Resolve the worker count, falling back to the host's parallelism.
    pub fn worker_count(&self) -> usize {
        if self.parallel_workers > 0 {
            return self.parallel_workers;
        }
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
    }
}

/// Resize settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResizeConfig {
    /// Longest edge after resizing; 0 disables resizing
    pub max_dimension: u32,
}

impl Default for ResizeConfig {
    fn default() -> Self {
        Self {
            max_dimension: 3000,
        }
    }
}

/// Watermark text settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WatermarkConfig {
    /// Point size; values below 1 select the size from the image dimensions
    pub font_size: f32,

    /// Directory holding the bundled font
    pub font_dir: PathBuf,

    /// File name of the TrueType font inside `font_dir`
    pub font_name: String,
}

impl Default for WatermarkConfig {
    fn default() -> Self {
        Self {
            font_size: 0.0,
            font_dir: PathBuf::from("~/.photowm/fonts"),
            font_name: "hwxihei.ttf".to_string(),
        }
    }
}

/// Reverse-geocoding provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeocoderConfig {
    /// Geocoder endpoint (queried with `key` and `location` parameters)
    pub endpoint: String,

    /// API key (supports ${ENV_VAR} syntax)
    pub api_key: String,

    /// Hard cap on provider calls per second, shared by all workers
    pub rate_per_second: u32,

    /// Per-request timeout in milliseconds
    pub timeout_ms: u64,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://apis.map.qq.com/ws/geocoder/v1/".to_string(),
            api_key: "${PHOTOWM_GEOCODER_KEY}".to_string(),
            rate_per_second: 3,
            timeout_ms: 10_000,
        }
    }
}

impl GeocoderConfig {
    /// Return the API key with environment variables expanded.
    ///
    /// An unset variable leaves the placeholder text as-is.
    pub fn resolved_api_key(&self) -> String {
        shellexpand::env(&self.api_key)
            .map(|s| s.into_owned())
            .unwrap_or_else(|_| self.api_key.clone())
    }
}

/// Output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// JPEG quality (1-100)
    pub quality: u8,

    /// Name of the output directory created next to the input
    pub dir_name: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            quality: 90,
            dir_name: "out".to_string(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
