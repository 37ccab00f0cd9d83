//! Core data types for the photowm pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::PipelineError;

/// Capture metadata extracted once per file from its EXIF block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PhotoMetadata {
    /// Capture time formatted as `YYYY-MM-DD HH:MM:SS`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capture_time: Option<String>,

    /// GPS latitude (decimal degrees, negative in the southern hemisphere)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,

    /// GPS longitude (decimal degrees, negative in the western hemisphere)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,

    /// EXIF orientation code (0 = unset)
    pub orientation: u32,
}

impl PhotoMetadata {
    /// Coordinates eligible for reverse geocoding.
    ///
    /// Both values must be present and strictly positive. Southern and
    /// western hemisphere locations are therefore never looked up.
    pub fn geocodable_coordinates(&self) -> Option<Coordinates> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) if latitude > 0.0 && longitude > 0.0 => {
                Some(Coordinates {
                    latitude,
                    longitude,
                })
            }
            _ => None,
        }
    }
}

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Result of running one file through the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessedPhoto {
    /// Input file
    pub source: PathBuf,

    /// Written output file
    pub output: PathBuf,

    /// Output width in pixels
    pub width: u32,

    /// Output height in pixels
    pub height: u32,

    /// Metadata, if the file had any usable EXIF fields
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<PhotoMetadata>,

    /// Text lines drawn onto the image, bottom line last
    pub watermark_lines: Vec<String>,

    /// Whether the watermark was actually drawn
    pub watermarked: bool,
}

/// Outcome for one job handed to the worker pool.
#[derive(Debug)]
pub struct ProcessingOutcome {
    pub path: PathBuf,
    pub result: Result<ProcessedPhoto, PipelineError>,
}

/// Processing statistics for a batch run.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProcessingStats {
    /// Total images processed successfully
    pub succeeded: usize,

    /// Total images that failed
    pub failed: usize,

    /// Processing rate in images per second
    pub images_per_second: f64,

    /// Total processing time in seconds
    pub total_seconds: f64,
}
