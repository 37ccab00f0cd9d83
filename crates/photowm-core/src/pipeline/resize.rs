//! Downscaling to a maximum dimension with aspect ratio preserved.

use image::imageops::{self, FilterType};
use image::RgbImage;

/// Compute the target size, or `None` when no resize is needed.
///
/// Resizing triggers only when both dimensions exceed `max_dimension`; the
/// longer side is then scaled down to `max_dimension`. A maximum of 0
/// disables resizing.
pub fn target_dimensions(width: u32, height: u32, max_dimension: u32) -> Option<(u32, u32)> {
    if max_dimension == 0 || width <= max_dimension || height <= max_dimension {
        return None;
    }
    let scale = |short: u32, long: u32| -> u32 {
        let scaled = (short as u64 * max_dimension as u64 + long as u64 / 2) / long as u64;
        (scaled as u32).max(1)
    };
    if width > height {
        Some((max_dimension, scale(height, width)))
    } else {
        Some((scale(width, height), max_dimension))
    }
}

/// Resize with Lanczos3 if the image is larger than `max_dimension`.
pub fn resize_to_fit(image: RgbImage, max_dimension: u32) -> RgbImage {
    let (width, height) = image.dimensions();
    match target_dimensions(width, height, max_dimension) {
        Some((w, h)) => {
            tracing::trace!("  Resize: {}x{} -> {}x{}", width, height, w, h);
            imageops::resize(&image, w, h, FilterType::Lanczos3)
        }
        None => image,
    }
}
