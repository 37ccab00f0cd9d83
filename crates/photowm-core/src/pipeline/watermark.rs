//! Bottom-right text watermark with a one-pixel offset shadow.
//!
//! Each line is drawn twice: black at the anchor, then white at the anchor
//! shifted by (-1, -1). The result stays readable on light and dark
//! backgrounds without a backing panel.
//!
//! ```text
//!   ┌──────────────────────────────┐
//!   │                              │
//!   │             2017-10-01 08:30 │  ← line 0, one line-height up
//!   │          上海市,长宁区        │  ← last line, size/2 above bottom
//!   └──────────────────────────────┘
//!                               ↑ size/2 right padding
//! ```

use image::{Rgb, RgbImage};
use std::path::Path;
use std::sync::Arc;

use super::font::{FontFace, TrueTypeFace};

const SHADOW: Rgb<u8> = Rgb([0, 0, 0]);
const FILL: Rgb<u8> = Rgb([255, 255, 255]);

/// Text size derived from the image: 12pt plus 1pt per 100px of the longer side.
pub fn auto_font_size(width: u32, height: u32) -> f32 {
    12.0 + (width.max(height) as f32 / 100.0).floor()
}

/// Use `requested` unless it is below 1, in which case size automatically.
pub fn resolve_font_size(requested: f32, width: u32, height: u32) -> f32 {
    if requested < 1.0 {
        auto_font_size(width, height)
    } else {
        requested
    }
}

/// Where a line's shadow pass starts: left edge and baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineAnchor {
    pub x: i32,
    pub baseline: i32,
}

/// Lay out lines right-aligned and stacked upward from the bottom edge.
///
/// `line_widths` are total advance widths in pixels, in drawing order (the
/// last entry sits on the bottom row).
pub fn layout_lines(width: u32, height: u32, size: f32, line_widths: &[f32]) -> Vec<LineAnchor> {
    let padding = (size / 2.0) as i32;
    let line_height = size as i32;
    let count = line_widths.len() as i32;

    line_widths
        .iter()
        .enumerate()
        .map(|(i, w)| {
            let rows_below = count - i as i32 - 1;
            LineAnchor {
                x: width as i32 - w.floor() as i32 - padding,
                baseline: height as i32 - line_height * rows_below - padding,
            }
        })
        .collect()
}

/// Draws watermark text onto images.
///
/// Without a usable font the compositor passes images through unchanged.
#[derive(Clone)]
pub struct Compositor {
    face: Option<Arc<dyn FontFace>>,
}

impl Compositor {
    pub fn new(face: Arc<dyn FontFace>) -> Self {
        Self { face: Some(face) }
    }

    /// A compositor that never draws.
    pub fn without_font() -> Self {
        Self { face: None }
    }

    /// Load the TrueType font at `path`. Failure is logged, not returned.
    pub fn load(path: &Path) -> Self {
        match TrueTypeFace::load(path) {
            Ok(face) => {
                tracing::debug!("Loaded watermark font {:?}", path);
                Self::new(Arc::new(face))
            }
            Err(e) => {
                tracing::warn!(
                    "{e}; photos will be written without a watermark. \
                     Install a TrueType font at {} or set watermark.font_dir and watermark.font_name",
                    path.display()
                );
                Self::without_font()
            }
        }
    }

    pub fn has_font(&self) -> bool {
        self.face.is_some()
    }

    /// Draw `lines` in the bottom-right corner of `image`.
    ///
    /// `font_size` below 1 selects [`auto_font_size`].
    pub fn compose(&self, mut image: RgbImage, font_size: f32, lines: &[String]) -> RgbImage {
        let Some(face) = &self.face else {
            tracing::debug!("No watermark font loaded, leaving image unchanged");
            return image;
        };
        if lines.is_empty() {
            return image;
        }

        let (width, height) = image.dimensions();
        let size = resolve_font_size(font_size, width, height);
        let widths: Vec<f32> = lines.iter().map(|l| face.text_width(l, size)).collect();
        let anchors = layout_lines(width, height, size, &widths);

        for (line, anchor) in lines.iter().zip(anchors) {
            face.draw(&mut image, SHADOW, anchor.x, anchor.baseline, size, line);
            face.draw(&mut image, FILL, anchor.x - 1, anchor.baseline - 1, size, line);
        }
        image
    }
}
