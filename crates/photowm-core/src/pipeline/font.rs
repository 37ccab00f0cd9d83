//! Font metrics and glyph rendering for the watermark.

use ab_glyph::{Font, FontArc, PxScale, ScaleFont};
use image::{Rgb, RgbImage};
use std::path::Path;

use crate::error::FontError;

/// A face the compositor can measure and draw with.
///
/// `size` is always the em size in pixels (point size at 72 DPI).
pub trait FontFace: Send + Sync {
    /// Horizontal advance of one character.
    fn advance_width(&self, c: char, size: f32) -> f32;

    /// Draw `text` with its baseline starting at `(x, baseline)`.
    fn draw(
        &self,
        canvas: &mut RgbImage,
        color: Rgb<u8>,
        x: i32,
        baseline: i32,
        size: f32,
        text: &str,
    );

    /// Total advance width of a line, summed per glyph.
    fn text_width(&self, text: &str, size: f32) -> f32 {
        text.chars().map(|c| self.advance_width(c, size)).sum()
    }
}

/// TrueType/OpenType face rendered through `imageproc`.
pub struct TrueTypeFace {
    font: FontArc,
    /// Converts em size to `ab_glyph`'s ascent-to-descent pixel scale
    em_to_px: f32,
}

impl TrueTypeFace {
    /// Load a font file from disk.
    pub fn load(path: &Path) -> Result<Self, FontError> {
        let data = std::fs::read(path).map_err(|source| FontError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_bytes(data, path)
    }

    /// Parse font bytes. `origin` is only used for error messages.
    pub fn from_bytes(data: Vec<u8>, origin: &Path) -> Result<Self, FontError> {
        let font = FontArc::try_from_vec(data).map_err(|e| FontError::Parse {
            path: origin.to_path_buf(),
            message: e.to_string(),
        })?;
        let em_to_px = match font.units_per_em() {
            Some(upem) if upem > 0.0 => font.height_unscaled() / upem,
            _ => 1.0,
        };
        Ok(Self { font, em_to_px })
    }

    fn scale(&self, size: f32) -> PxScale {
        PxScale::from(size * self.em_to_px)
    }
}

impl FontFace for TrueTypeFace {
    fn advance_width(&self, c: char, size: f32) -> f32 {
        let scaled = self.font.as_scaled(self.scale(size));
        scaled.h_advance(self.font.glyph_id(c))
    }

    fn draw(
        &self,
        canvas: &mut RgbImage,
        color: Rgb<u8>,
        x: i32,
        baseline: i32,
        size: f32,
        text: &str,
    ) {
        let scale = self.scale(size);
        // imageproc positions text by its top edge (baseline - ascent)
        let ascent = self.font.as_scaled(scale).ascent();
        let top = baseline - ascent.round() as i32;
        imageproc::drawing::draw_text_mut(canvas, color, x, top, scale, &self.font, text);
    }
}
