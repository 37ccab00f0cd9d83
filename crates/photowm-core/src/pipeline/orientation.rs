//! EXIF orientation correction by explicit pixel remapping.
//!
//! Only the three pure rotations are handled. Mirrored codes (2, 4, 5, 7)
//! and anything else pass through untouched.
//!
//! ```text
//!   code 3: 180°   out(x, y) = in(w-1-x, h-1-y)   w×h
//!   code 6:  90°   out(x, y) = in(y, h-1-x)       h×w
//!   code 8: 270°   out(x, y) = in(w-1-y, x)       h×w
//! ```

use image::{ImageBuffer, Pixel};

/// Rotate `image` upright according to its EXIF orientation code.
///
/// For codes other than 3, 6 and 8 the input buffer is returned as-is
/// (same allocation, no copy).
pub fn fix_orientation<P>(
    image: ImageBuffer<P, Vec<P::Subpixel>>,
    code: u32,
) -> ImageBuffer<P, Vec<P::Subpixel>>
where
    P: Pixel,
{
    let (w, h) = image.dimensions();
    match code {
        3 => ImageBuffer::from_fn(w, h, |x, y| *image.get_pixel(w - 1 - x, h - 1 - y)),
        6 => ImageBuffer::from_fn(h, w, |x, y| *image.get_pixel(y, h - 1 - x)),
        8 => ImageBuffer::from_fn(h, w, |x, y| *image.get_pixel(w - 1 - y, x)),
        _ => image,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::imageops;
    use image::{Rgb, RgbImage};

    fn gradient(w: u32, h: u32) -> RgbImage {
        RgbImage::from_fn(w, h, |x, y| Rgb([x as u8, y as u8, (x * 31 + y * 17) as u8]))
    }

    #[test]
    fn test_code_3_twice_is_identity() {
        let img = gradient(7, 4);
        let back = fix_orientation(fix_orientation(img.clone(), 3), 3);
        assert_eq!(back, img);
    }

    #[test]
    fn test_code_6_then_8_is_identity() {
        let img = gradient(7, 4);
        let rotated = fix_orientation(img.clone(), 6);
        assert_eq!(rotated.dimensions(), (4, 7));
        let back = fix_orientation(rotated, 8);
        assert_eq!(back.dimensions(), (7, 4));
        assert_eq!(back, img);
    }

    #[test]
    fn test_matches_imageops_rotations() {
        let img = gradient(5, 3);
        assert_eq!(fix_orientation(img.clone(), 3), imageops::rotate180(&img));
        assert_eq!(fix_orientation(img.clone(), 6), imageops::rotate90(&img));
        assert_eq!(fix_orientation(img.clone(), 8), imageops::rotate270(&img));
    }

    #[test]
    fn test_corner_pixels_code_6() {
        let img = gradient(5, 3);
        let out = fix_orientation(img.clone(), 6);
        // Source bottom-left lands at destination top-left
        assert_eq!(out.get_pixel(0, 0), img.get_pixel(0, 2));
        assert_eq!(out.get_pixel(2, 4), img.get_pixel(4, 0));
    }

    #[test]
    fn test_unhandled_codes_return_same_buffer() {
        for code in [0, 1, 2, 4, 5, 7, 9, 42] {
            let img = gradient(6, 2);
            let ptr = img.as_raw().as_ptr();
            let out = fix_orientation(img, code);
            assert_eq!(out.as_raw().as_ptr(), ptr, "code {code} reallocated");
            assert_eq!(out.dimensions(), (6, 2));
        }
    }

    #[test]
    fn test_single_pixel_and_single_row() {
        let px = gradient(1, 1);
        for code in [3, 6, 8] {
            assert_eq!(fix_orientation(px.clone(), code), px);
        }
        let row = gradient(4, 1);
        assert_eq!(fix_orientation(row.clone(), 6).dimensions(), (1, 4));
    }
}
