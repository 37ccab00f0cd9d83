//! Pipeline orchestration - wires together all processing stages.
//!
//! ```text
//! read → decode → resize? → metadata → orient? → geocode? → watermark? → encode
//! ```
//!
//! Pixel work runs on the blocking pool; the geocode call runs on the async
//! worker so it can wait on the shared rate limiter without pinning a thread.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use crate::config::Config;
use crate::error::{PipelineError, PipelineResult, Result};
use crate::geo::{HttpGeocoder, Locator, RateLimiter};
use crate::types::{PhotoMetadata, ProcessedPhoto};

use super::decode::ImageDecoder;
use super::encode::OutputWriter;
use super::metadata::MetadataExtractor;
use super::orientation::fix_orientation;
use super::resize::resize_to_fit;
use super::watermark::Compositor;

/// Options for controlling per-file processing.
#[derive(Debug, Clone)]
pub struct ProcessOptions {
    /// Longest side after resizing (0 disables resize)
    pub max_dimension: u32,
    /// Watermark size in points (below 1 = automatic)
    pub font_size: f32,
    /// Directory outputs are written into
    pub output_dir: PathBuf,
    /// JPEG quality factor
    pub quality: u8,
}

impl ProcessOptions {
    pub fn from_config(config: &Config, output_dir: PathBuf) -> Self {
        Self {
            max_dimension: config.resize.max_dimension,
            font_size: config.watermark.font_size,
            output_dir,
            quality: config.output.quality,
        }
    }
}

/// Runs one file at a time through every stage. Cheap to share across workers.
pub struct PhotoPipeline {
    options: ProcessOptions,
    locator: Locator,
    compositor: Compositor,
    writer: OutputWriter,
}

impl PhotoPipeline {
    pub fn new(options: ProcessOptions, locator: Locator, compositor: Compositor) -> Self {
        let writer = OutputWriter::new(options.output_dir.clone(), options.quality);
        Self {
            options,
            locator,
            compositor,
            writer,
        }
    }

    /// Build the production pipeline: HTTP geocoder behind a fresh rate
    /// limiter, and the configured font loaded once.
    pub fn from_config(config: &Config, options: ProcessOptions) -> Result<Self> {
        let limiter = Arc::new(RateLimiter::new(config.geocoder.rate_per_second));
        let geocoder = Arc::new(HttpGeocoder::new(&config.geocoder)?);
        let locator = Locator::new(geocoder, limiter);
        let compositor = Compositor::load(&config.font_path());
        Ok(Self::new(options, locator, compositor))
    }

    pub fn locator(&self) -> &Locator {
        &self.locator
    }

    /// Process a single photo and write the result.
    pub async fn process(&self, path: &Path) -> PipelineResult<ProcessedPhoto> {
        let start = Instant::now();
        tracing::debug!("Processing: {:?}", path);

        let bytes = ImageDecoder::read(path).await?;
        tracing::trace!("  Read: {:?}", start.elapsed());

        // Decode, resize, metadata, orientation
        let prepare_start = Instant::now();
        let max_dimension = self.options.max_dimension;
        let source = path.to_path_buf();
        let (image, metadata) = run_blocking(path, move || {
            let image = ImageDecoder::decode_bytes(&bytes, &source)?;
            let image = resize_to_fit(image, max_dimension);
            let metadata = MetadataExtractor::extract(&bytes);
            let image = match &metadata {
                Some(meta) => fix_orientation(image, meta.orientation),
                None => image,
            };
            Ok((image, metadata))
        })
        .await?;
        tracing::trace!("  Prepare: {:?}", prepare_start.elapsed());

        // Geocode
        let geocode_start = Instant::now();
        let locality = match metadata.as_ref().and_then(|m| m.geocodable_coordinates()) {
            Some(coords) => Some(self.locator.locate(coords).await.map_err(|failure| {
                PipelineError::Geocode {
                    path: path.to_path_buf(),
                    attempts: failure.attempts,
                    message: failure.last_error.to_string(),
                }
            })?),
            None => None,
        };
        tracing::trace!("  Geocode: {:?}", geocode_start.elapsed());

        let lines = watermark_lines(metadata.as_ref(), locality);
        let watermarked = self.compositor.has_font() && !lines.is_empty();

        // Watermark and encode
        let finish_start = Instant::now();
        let compositor = self.compositor.clone();
        let writer = self.writer.clone();
        let font_size = self.options.font_size;
        let text = lines.clone();
        let source = path.to_path_buf();
        let (output, width, height) = run_blocking(path, move || {
            let image = compositor.compose(image, font_size, &text);
            let (width, height) = image.dimensions();
            let output = writer.write(&image, &source)?;
            Ok((output, width, height))
        })
        .await?;
        tracing::trace!("  Watermark + encode: {:?}", finish_start.elapsed());

        tracing::debug!(
            "Processed {:?} in {:?} ({}x{})",
            path,
            start.elapsed(),
            width,
            height
        );

        Ok(ProcessedPhoto {
            source: path.to_path_buf(),
            output,
            width,
            height,
            metadata,
            watermark_lines: lines,
            watermarked,
        })
    }
}

/// Watermark text: capture time, then locality when one was resolved.
///
/// Without metadata there is nothing to draw.
pub fn watermark_lines(metadata: Option<&PhotoMetadata>, locality: Option<String>) -> Vec<String> {
    let Some(meta) = metadata else {
        return Vec::new();
    };
    meta.capture_time
        .iter()
        .filter(|t| !t.is_empty())
        .cloned()
        .chain(locality.filter(|l| !l.is_empty()))
        .collect()
}

async fn run_blocking<T, F>(path: &Path, f: F) -> PipelineResult<T>
where
    F: FnOnce() -> PipelineResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| PipelineError::Task {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GeocodeError;
    use crate::geo::Geocoder;
    use crate::pipeline::metadata::tests::{jpeg_with_exif, ExifFixture};
    use crate::pipeline::watermark::tests::BlockFace;
    use crate::types::Coordinates;
    use async_trait::async_trait;
    use image::GenericImageView;

    struct StubGeocoder(Option<&'static str>);

    #[async_trait]
    impl Geocoder for StubGeocoder {
        fn name(&self) -> &str {
            "stub"
        }

        async fn lookup(&self, _coords: Coordinates) -> std::result::Result<String, GeocodeError> {
            match self.0 {
                Some(locality) => Ok(locality.to_string()),
                None => Err(GeocodeError::Provider {
                    status: 311,
                    message: "key invalid".to_string(),
                }),
            }
        }
    }

    fn pipeline(out: &Path, locality: Option<&'static str>, max_dimension: u32) -> PhotoPipeline {
        let options = ProcessOptions {
            max_dimension,
            font_size: 0.0,
            output_dir: out.to_path_buf(),
            quality: 90,
        };
        let locator = Locator::new(
            Arc::new(StubGeocoder(locality)),
            Arc::new(RateLimiter::unlimited()),
        );
        PhotoPipeline::new(options, locator, Compositor::new(Arc::new(BlockFace)))
    }

    /// Temp dir with the input written to `<dir>/<name>` and an empty `<dir>/out`.
    fn stage(name: &str, bytes: Vec<u8>) -> (tempfile::TempDir, PathBuf, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join(name);
        std::fs::write(&input, bytes).unwrap();
        let out = dir.path().join("out");
        std::fs::create_dir(&out).unwrap();
        (dir, input, out)
    }

    fn shanghai() -> ExifFixture {
        ExifFixture {
            orientation: Some(6),
            datetime: Some("2017:10:01 08:30:15"),
            latitude: Some((31, 12, "N")),
            longitude: Some((121, 24, "E")),
        }
    }

    #[test]
    fn test_watermark_lines() {
        let meta = PhotoMetadata {
            capture_time: Some("2017-10-01 08:30:15".to_string()),
            ..Default::default()
        };
        assert_eq!(
            watermark_lines(Some(&meta), Some("Shanghai".to_string())),
            vec!["2017-10-01 08:30:15", "Shanghai"]
        );
        assert_eq!(watermark_lines(Some(&meta), None), vec!["2017-10-01 08:30:15"]);
        assert!(watermark_lines(None, Some("Shanghai".to_string())).is_empty());
        assert!(watermark_lines(Some(&PhotoMetadata::default()), None).is_empty());
    }

    #[tokio::test]
    async fn test_rotated_geotagged_photo() {
        let (_dir, input, out) = stage("IMG_0001.jpg", jpeg_with_exif(64, 48, Some(&shanghai())));

        let photo = pipeline(&out, Some("Shanghai"), 0)
            .process(&input)
            .await
            .unwrap();

        assert_eq!(photo.output, out.join("IMG_0001.jpg"));
        assert_eq!((photo.width, photo.height), (48, 64));
        assert_eq!(
            photo.watermark_lines,
            vec!["2017-10-01 08:30:15".to_string(), "Shanghai".to_string()]
        );
        assert!(photo.watermarked);

        let decoded = image::open(&photo.output).unwrap();
        assert_eq!(decoded.dimensions(), (48, 64));
    }

    #[tokio::test]
    async fn test_photo_without_exif_is_only_reencoded() {
        let (_dir, input, out) = stage("plain.jpg", jpeg_with_exif(40, 30, None));

        let photo = pipeline(&out, None, 0).process(&input).await.unwrap();

        assert!(photo.metadata.is_none());
        assert!(photo.watermark_lines.is_empty());
        assert!(!photo.watermarked);
        assert_eq!(image::open(&photo.output).unwrap().dimensions(), (40, 30));
    }

    #[tokio::test]
    async fn test_resize_applies_before_orientation() {
        let (_dir, input, out) = stage("big.jpg", jpeg_with_exif(80, 60, Some(&shanghai())));

        let photo = pipeline(&out, Some("Shanghai"), 40)
            .process(&input)
            .await
            .unwrap();
        // 80x60 -> 40x30, then rotated to 30x40
        assert_eq!((photo.width, photo.height), (30, 40));
    }

    #[tokio::test(start_paused = true)]
    async fn test_unresolvable_coordinates_fail_the_file() {
        let (_dir, input, out) = stage("a.jpg", jpeg_with_exif(16, 16, Some(&shanghai())));

        let err = pipeline(&out, None, 0).process(&input).await.unwrap_err();
        match err {
            PipelineError::Geocode { attempts, message, .. } => {
                assert_eq!(attempts, 3);
                assert!(message.contains("key invalid"));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(!out.join("a.jpg").exists());
    }

    #[tokio::test]
    async fn test_southern_hemisphere_skips_geocoding() {
        let fixture = ExifFixture {
            datetime: Some("2019:03:04 10:00:00"),
            latitude: Some((33, 51, "S")),
            longitude: Some((151, 12, "E")),
            ..Default::default()
        };
        let (_dir, input, out) = stage("sydney.jpg", jpeg_with_exif(16, 16, Some(&fixture)));

        // A failing geocoder would abort the file if it were consulted
        let photo = pipeline(&out, None, 0).process(&input).await.unwrap();
        assert_eq!(photo.watermark_lines, vec!["2019-03-04 10:00:00".to_string()]);
    }

    #[tokio::test]
    async fn test_corrupt_file_is_decode_error() {
        let (_dir, input, out) = stage("broken.jpg", b"\xFF\xD8\xFFnot really a jpeg".to_vec());

        let err = pipeline(&out, None, 0).process(&input).await.unwrap_err();
        assert!(matches!(err, PipelineError::Decode { .. }));
    }

    #[tokio::test]
    async fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = pipeline(dir.path(), None, 0)
            .process(&dir.path().join("gone.jpg"))
            .await
            .unwrap_err();
        assert!(matches!(err, PipelineError::FileNotFound(_)));
    }
}
