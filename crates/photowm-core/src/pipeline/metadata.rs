//! EXIF metadata extraction.

use exif::{In, Reader, Tag, Value};
use std::io::Cursor;

use crate::types::PhotoMetadata;

/// Extracts capture metadata from JPEG bytes.
pub struct MetadataExtractor;

impl MetadataExtractor {
    /// Extract metadata from an in-memory JPEG.
    ///
    /// Returns `None` if the file has no EXIF block, the block is corrupt, or
    /// none of the fields used downstream are present.
    pub fn extract(bytes: &[u8]) -> Option<PhotoMetadata> {
        let mut cursor = Cursor::new(bytes);
        let exif = Reader::new().read_from_container(&mut cursor).ok()?;

        let capture_time = Self::get_datetime(&exif);
        let orientation = Self::get_u32(&exif, Tag::Orientation);
        let latitude = Self::get_gps_coord(&exif, Tag::GPSLatitude, Tag::GPSLatitudeRef);
        let longitude = Self::get_gps_coord(&exif, Tag::GPSLongitude, Tag::GPSLongitudeRef);

        // Coordinates are only meaningful as a pair
        let (latitude, longitude) = match (latitude, longitude) {
            (Some(lat), Some(lon)) => (Some(lat), Some(lon)),
            _ => (None, None),
        };

        if capture_time.is_none() && orientation.is_none() && latitude.is_none() {
            return None;
        }

        Some(PhotoMetadata {
            capture_time,
            latitude,
            longitude,
            orientation: orientation.unwrap_or(0),
        })
    }

    fn get_u32(exif: &exif::Exif, tag: Tag) -> Option<u32> {
        exif.get_field(tag, In::PRIMARY)
            .and_then(|f| match &f.value {
                Value::Short(v) => v.first().map(|&x| x as u32),
                Value::Long(v) => v.first().copied(),
                _ => None,
            })
    }

    /// Capture time as `YYYY-MM-DD HH:MM:SS`, preferring DateTimeOriginal.
    fn get_datetime(exif: &exif::Exif) -> Option<String> {
        let field = exif
            .get_field(Tag::DateTimeOriginal, In::PRIMARY)
            .or_else(|| exif.get_field(Tag::DateTime, In::PRIMARY))?;
        let raw = match &field.value {
            Value::Ascii(parts) => parts.first()?,
            _ => return None,
        };
        let dt = exif::DateTime::from_ascii(raw).ok()?;
        Some(format!(
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            dt.year, dt.month, dt.day, dt.hour, dt.minute, dt.second
        ))
    }

    /// GPS coordinate in decimal degrees, negative for S/W references.
    fn get_gps_coord(exif: &exif::Exif, coord_tag: Tag, ref_tag: Tag) -> Option<f64> {
        let coord = exif.get_field(coord_tag, In::PRIMARY)?;
        let degrees = Self::parse_gps_rationals(&coord.value)?;

        let negative = exif
            .get_field(ref_tag, In::PRIMARY)
            .map(|f| match &f.value {
                Value::Ascii(parts) => parts
                    .first()
                    .is_some_and(|p| p.first().is_some_and(|&c| c == b'S' || c == b'W')),
                _ => false,
            })
            .unwrap_or(false);

        Some(if negative { -degrees } else { degrees })
    }

    /// Parse degrees, minutes, seconds rationals into decimal degrees.
    fn parse_gps_rationals(value: &Value) -> Option<f64> {
        match value {
            Value::Rational(rationals) if rationals.len() >= 3 => {
                if rationals.iter().take(3).any(|r| r.denom == 0) {
                    return None;
                }
                let degrees = rationals[0].to_f64();
                let minutes = rationals[1].to_f64();
                let seconds = rationals[2].to_f64();
                let dd = degrees + minutes / 60.0 + seconds / 3600.0;
                dd.is_finite().then_some(dd)
            }
            _ => None,
        }
    }
}
