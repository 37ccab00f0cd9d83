//! Single-file and batch processing.

use anyhow::Context;
use clap::Args;
use photowm_core::{
    Config, Dispatcher, FileDiscovery, PhotoPipeline, ProcessOptions, ProcessingOutcome,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::expand_path;

/// Processing arguments. `--file` and `--path` select the mode.
#[derive(Args, Debug, Default)]
pub struct ProcessArgs {
    /// Process a single photo
    #[arg(long, value_name = "FILE", conflicts_with = "path")]
    pub file: Option<PathBuf>,

    /// Process every photo under a directory, recursively
    #[arg(long, value_name = "DIR")]
    pub path: Option<PathBuf>,

    /// Maximum width/height after resizing (0 disables resizing)
    #[arg(long, value_name = "PIXELS")]
    pub width: Option<u32>,

    /// Watermark font size in points (0 = scale with the image)
    #[arg(long, value_name = "POINTS")]
    pub fontsize: Option<f32>,

    /// Output directory (defaults to <input-dir>/out)
    #[arg(long, value_name = "DIR")]
    pub out: Option<PathBuf>,

    /// Number of parallel workers (defaults to available parallelism)
    #[arg(long, value_name = "N")]
    pub workers: Option<usize>,
}

impl ProcessArgs {
    pub fn has_input(&self) -> bool {
        self.file.is_some() || self.path.is_some()
    }

    /// Apply command-line overrides on top of the loaded config.
    fn apply_to(&self, config: &mut Config) {
        if let Some(width) = self.width {
            config.resize.max_dimension = width;
        }
        if let Some(size) = self.fontsize {
            config.watermark.font_size = size;
        }
        if let Some(workers) = self.workers {
            config.processing.parallel_workers = workers;
        }
    }
}

/// Execute single-file or batch mode.
pub async fn execute(args: ProcessArgs, mut config: Config) -> anyhow::Result<()> {
    args.apply_to(&mut config);
    config.validate()?;

    if let Some(file) = &args.file {
        let file = expand_path(file);
        let out = output_dir(args.out.as_deref(), input_dir(&file), &config);
        process_single(&config, &file, out).await
    } else if let Some(dir) = &args.path {
        let dir = expand_path(dir);
        if !dir.is_dir() {
            anyhow::bail!("Not a directory: {}", dir.display());
        }
        let out = output_dir(args.out.as_deref(), &dir, &config);
        process_batch(&config, &dir, out).await
    } else {
        Ok(())
    }
}

/// Directory a single file's default output lands next to.
fn input_dir(file: &Path) -> &Path {
    match file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

/// `--out` if given, else `<input-dir>/<output.dir_name>`.
fn output_dir(explicit: Option<&Path>, input_dir: &Path, config: &Config) -> PathBuf {
    match explicit {
        Some(dir) => expand_path(dir),
        None => input_dir.join(&config.output.dir_name),
    }
}

fn build_pipeline(config: &Config, out: PathBuf) -> anyhow::Result<PhotoPipeline> {
    std::fs::create_dir_all(&out)
        .with_context(|| format!("Cannot create output directory {}", out.display()))?;
    tracing::debug!("Writing output to {:?}", out);
    let options = ProcessOptions::from_config(config, out);
    Ok(PhotoPipeline::from_config(config, options)?)
}

/// A file failing here is the command failing.
async fn process_single(config: &Config, file: &Path, out: PathBuf) -> anyhow::Result<()> {
    let pipeline = build_pipeline(config, out)?;
    let photo = pipeline.process(file).await?;
    println!("{} ... OK", file.display());
    tracing::info!(
        "Wrote {} ({}x{})",
        photo.output.display(),
        photo.width,
        photo.height
    );
    Ok(())
}

/// Per-file failures are reported and the batch still succeeds.
async fn process_batch(config: &Config, dir: &Path, out: PathBuf) -> anyhow::Result<()> {
    let discovery = FileDiscovery::new(config.processing.clone());
    let files = discovery.discover(dir, Some(&out));
    println!("Found {} photo(s).", files.len());
    if files.is_empty() {
        tracing::warn!("No supported photos found under {:?}", dir);
        return Ok(());
    }
    tracing::debug!(
        "Discovered {} bytes across {} file(s)",
        FileDiscovery::total_size(&files),
        files.len()
    );

    let pipeline = Arc::new(build_pipeline(config, out)?);
    let limiter = pipeline.locator().limiter().clone();
    let workers = config.processing.worker_count();
    tracing::info!("Processing with {} worker(s)", workers);

    let dispatcher = Dispatcher::new(pipeline, workers);
    let paths = files.into_iter().map(|f| f.path).collect();
    let stats = dispatcher.run(paths, |outcome| println!("{}", report_line(&outcome))).await;

    tracing::info!(
        "Completed: {} succeeded, {} failed ({:.1} photos/sec, {} geocode request(s), {:.1}s)",
        stats.succeeded,
        stats.failed,
        stats.images_per_second,
        limiter.takes(),
        stats.total_seconds
    );
    Ok(())
}

/// `<path> ... OK` or `<path> ... ERR: <detail>`.
fn report_line(outcome: &ProcessingOutcome) -> String {
    match &outcome.result {
        Ok(_) => format!("{} ... OK", outcome.path.display()),
        Err(e) => format!("{} ... ERR: {}", outcome.path.display(), e),
    }
}
