//! photowm CLI - batch photo orientation fix, resize and watermarking.
//!
//! Every photo is rotated upright from its EXIF orientation, optionally
//! downscaled, stamped bottom-right with its capture time and (for geotagged
//! photos) the reverse-geocoded place name, and written as JPEG into an
//! output directory.
//!
//! # Usage
//!
//! ```bash
//! # Process a single photo into ./out
//! photowm --file IMG_0001.jpg
//!
//! # Process a directory tree, limiting the long side to 2000px
//! photowm --path ./photos --width 2000
//!
//! # View configuration
//! photowm config show
//! ```

use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

mod cli;
mod logging;

/// photowm - stamp photos with capture time and location.
#[derive(Parser, Debug)]
#[command(name = "photowm")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true, value_name = "FILE", env = "PHOTOWM_CONFIG")]
    config: Option<PathBuf>,

    #[command(flatten)]
    process: cli::process::ProcessArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.command.is_none() && !cli.process.has_input() {
        Cli::command().print_help()?;
        return Ok(());
    }

    let config_path = cli.config.as_deref().map(cli::expand_path);
    // Logging isn't initialized yet, so use eprintln for config warnings.
    let config = match &config_path {
        Some(path) if path.exists() => photowm_core::Config::load_from(path)?,
        Some(path) if cli.command.is_none() => {
            anyhow::bail!("Config file not found: {}", path.display())
        }
        // `config init` may be about to create it
        Some(_) => photowm_core::Config::default(),
        None => match photowm_core::Config::load() {
            Ok(config) => config,
            Err(e) => {
                eprintln!(
                    "Warning: Failed to load config: {e}\n  \
                     Using default configuration. Check your config file with `photowm config path`."
                );
                photowm_core::Config::default()
            }
        },
    };
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("photowm v{}", photowm_core::VERSION);

    match cli.command {
        Some(Commands::Config(args)) => cli::config::execute(args, config_path).await,
        None => cli::process::execute(cli.process, config).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn file_and_path_are_exclusive() {
        let err = Cli::try_parse_from(["photowm", "--file", "a.jpg", "--path", "photos"]);
        assert!(err.is_err());
    }

    #[test]
    fn batch_flags_parse() {
        let cli = Cli::try_parse_from([
            "photowm", "--path", "photos", "--width", "2000", "--fontsize", "18.5", "--out",
            "/tmp/out", "--workers", "3",
        ])
        .unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.process.path, Some(PathBuf::from("photos")));
        assert_eq!(cli.process.width, Some(2000));
        assert_eq!(cli.process.fontsize, Some(18.5));
        assert_eq!(cli.process.out, Some(PathBuf::from("/tmp/out")));
        assert_eq!(cli.process.workers, Some(3));
    }

    #[test]
    fn no_arguments_means_no_input() {
        let cli = Cli::try_parse_from(["photowm"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.process.has_input());
    }

    #[test]
    fn config_subcommand_parses() {
        let cli = Cli::try_parse_from(["photowm", "config", "init", "--force"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Config(_))));
    }
}
