//! JPEG reading and decoding.

use image::{ImageFormat, RgbImage};
use std::io::ErrorKind;
use std::path::Path;

use crate::error::PipelineError;

/// Reads and decodes JPEG input files.
pub struct ImageDecoder;

impl ImageDecoder {
    /// Read the raw file bytes. The same buffer feeds decoding and EXIF parsing.
    pub async fn read(path: &Path) -> Result<Vec<u8>, PipelineError> {
        tokio::fs::read(path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => PipelineError::FileNotFound(path.to_path_buf()),
            _ => PipelineError::Decode {
                path: path.to_path_buf(),
                message: format!("Cannot read file: {}", e),
            },
        })
    }

    /// Decode JPEG bytes into an 8-bit RGB buffer.
    ///
    /// Any other format is rejected even if the `image` crate could read it.
    pub fn decode_bytes(bytes: &[u8], path: &Path) -> Result<RgbImage, PipelineError> {
        if !Self::is_jpeg(bytes) {
            return Err(PipelineError::Decode {
                path: path.to_path_buf(),
                message: "Not a JPEG file (invalid magic bytes)".to_string(),
            });
        }
        let image = image::load_from_memory_with_format(bytes, ImageFormat::Jpeg).map_err(|e| {
            PipelineError::Decode {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
        })?;
        Ok(image.into_rgb8())
    }

    /// JPEG: FF D8 FF
    fn is_jpeg(bytes: &[u8]) -> bool {
        bytes.len() >= 3 && bytes[0] == 0xFF && bytes[1] == 0xD8 && bytes[2] == 0xFF
    }
}
