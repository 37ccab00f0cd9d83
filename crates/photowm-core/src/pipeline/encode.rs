//! JPEG encoding and atomic output writes.

use image::codecs::jpeg::JpegEncoder;
use image::RgbImage;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use crate::error::PipelineError;

/// Encodes finished photos into the output directory.
#[derive(Debug, Clone)]
pub struct OutputWriter {
    output_dir: PathBuf,
    quality: u8,
}

impl OutputWriter {
    pub fn new(output_dir: impl Into<PathBuf>, quality: u8) -> Self {
        Self {
            output_dir: output_dir.into(),
            quality,
        }
    }

    /// Destination for `source`: same base name, inside the output directory.
    pub fn output_path(&self, source: &Path) -> PathBuf {
        match source.file_name() {
            Some(name) => self.output_dir.join(name),
            None => self.output_dir.join("output.jpg"),
        }
    }

    /// Encode `image` and move it into place under `source`'s base name.
    ///
    /// The JPEG is written to a temporary file in the output directory and
    /// renamed over the destination only once fully flushed, so an
    /// interrupted run never leaves a truncated file under the final name.
    pub fn write(&self, image: &RgbImage, source: &Path) -> Result<PathBuf, PipelineError> {
        let dest = self.output_path(source);
        let write_err = |source: std::io::Error| PipelineError::Write {
            path: dest.clone(),
            source,
        };

        let mut tmp = NamedTempFile::new_in(&self.output_dir).map_err(write_err)?;
        {
            let mut writer = BufWriter::new(tmp.as_file_mut());
            JpegEncoder::new_with_quality(&mut writer, self.quality)
                .encode_image(image)
                .map_err(|e| PipelineError::Encode {
                    path: source.to_path_buf(),
                    message: e.to_string(),
                })?;
            writer.flush().map_err(write_err)?;
        }

        tmp.persist(&dest).map_err(|e| write_err(e.error))?;
        tracing::trace!("  Wrote {:?}", dest);
        Ok(dest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_output_path_keeps_base_name() {
        let writer = OutputWriter::new("/photos/out", 90);
        assert_eq!(
            writer.output_path(Path::new("/photos/2017/IMG_0001.JPG")),
            PathBuf::from("/photos/out/IMG_0001.JPG")
        );
    }

    #[test]
    fn test_write_produces_decodable_jpeg() {
        let dir = tempfile::tempdir().unwrap();
        let writer = OutputWriter::new(dir.path(), 90);
        let img = RgbImage::from_pixel(40, 30, Rgb([10, 200, 30]));

        let dest = writer.write(&img, Path::new("/elsewhere/a.jpg")).unwrap();
        assert_eq!(dest, dir.path().join("a.jpg"));

        let decoded = image::open(&dest).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (40, 30));

        // Only the final file remains; the temporary was renamed away
        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_write_overwrites_existing() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.jpg"), b"stale").unwrap();
        let writer = OutputWriter::new(dir.path(), 90);

        writer
            .write(&RgbImage::new(8, 8), Path::new("a.jpg"))
            .unwrap();
        let bytes = std::fs::read(dir.path().join("a.jpg")).unwrap();
        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn test_write_missing_output_dir_fails() {
        let writer = OutputWriter::new("/nonexistent/photowm/out", 90);
        let err = writer
            .write(&RgbImage::new(4, 4), Path::new("a.jpg"))
            .unwrap_err();
        assert!(matches!(err, PipelineError::Write { .. }));
    }
}
