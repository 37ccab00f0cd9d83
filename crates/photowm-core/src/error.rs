//! Error types for the photowm processing pipeline.
//!
//! Errors are organized by stage so a batch report can say which step of
//! which file went wrong. Missing EXIF metadata is not an error: it is
//! represented as `None` and simply skips the stages that depend on it.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for photowm operations.
#[derive(Error, Debug)]
pub enum PhotowmError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Pipeline processing errors
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// The geocoder client could not be built
    #[error("Geocoder error: {0}")]
    Geocoder(#[from] GeocodeError),

    /// General I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Per-file pipeline errors. Every variant is terminal for the file it names.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Input file does not exist
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// Reading or decoding the JPEG failed
    #[error("Decode error for {path}: {message}")]
    Decode { path: PathBuf, message: String },

    /// Coordinates were present but could not be resolved after all retries
    #[error("Geocode failed for {path} after {attempts} attempt(s): {message}")]
    Geocode {
        path: PathBuf,
        attempts: u32,
        message: String,
    },

    /// JPEG encoding failed
    #[error("Encode error for {path}: {message}")]
    Encode { path: PathBuf, message: String },

    /// Writing the output file failed
    #[error("Write error for {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A blocking stage panicked or was cancelled
    #[error("Worker task failed for {path}: {message}")]
    Task { path: PathBuf, message: String },
}

/// A single failed reverse-geocoding attempt.
#[derive(Error, Debug)]
pub enum GeocodeError {
    /// Network or HTTP-level failure
    #[error("request failed: {0}")]
    Request(String),

    /// Response body was not the expected JSON shape
    #[error("invalid response: {0}")]
    Parse(String),

    /// Provider answered with a non-zero status
    #[error("provider error (status {status}): {message}")]
    Provider { status: i64, message: String },

    /// Response had no `result.ad_info.name` field
    #[error("response contained no locality name")]
    MissingLocality,

    /// The configured key is empty or still names an unset variable
    #[error("no API key configured (got {0:?}); set PHOTOWM_GEOCODER_KEY or geocoder.api_key")]
    MissingApiKey(String),
}

impl From<reqwest::Error> for GeocodeError {
    fn from(err: reqwest::Error) -> Self {
        GeocodeError::Request(err.to_string())
    }
}

/// Font loading errors. These never abort a file; the compositor degrades instead.
#[derive(Error, Debug)]
pub enum FontError {
    #[error("Failed to read font {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse font {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

/// Convenience type alias for photowm results.
pub type Result<T> = std::result::Result<T, PhotowmError>;

/// Convenience type alias for pipeline-specific results.
pub type PipelineResult<T> = std::result::Result<T, PipelineError>;
