//! Configuration management for photowm.
//!
//! Configuration is loaded from a TOML file with sensible defaults. Every
//! section implements `Default`, so a partial file only overrides what it names.

mod types;
mod validate;

pub use types::*;

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure for photowm.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Worker pool and discovery settings
    pub processing: ProcessingConfig,

    /// Resize settings
    pub resize: ResizeConfig,

    /// Watermark text settings
    pub watermark: WatermarkConfig,

    /// Reverse-geocoding settings
    pub geocoder: GeocoderConfig,

    /// Output settings
    pub output: OutputConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Returns default configuration if the file doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default config file path.
    ///
    /// Uses platform-appropriate directories:
    /// - macOS: ~/Library/Application Support/com.photowm.photowm/config.toml
    /// - Linux: ~/.config/photowm/config.toml
    /// - Windows: C:\Users\<User>\AppData\Roaming\photowm\config\config.toml
    ///
    /// Falls back to ~/.photowm/config.toml if directory detection fails.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("com", "photowm", "photowm")
            .map(|dirs| dirs.config_dir().to_path_buf().join("config.toml"))
            .unwrap_or_else(|| {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                PathBuf::from(home).join(".photowm").join("config.toml")
            })
    }

    /// Get the resolved path of the watermark font (with ~ expansion).
    pub fn font_path(&self) -> PathBuf {
        let dir = self.watermark.font_dir.to_string_lossy();
        let expanded = shellexpand::tilde(&dir);
        PathBuf::from(expanded.into_owned()).join(&self.watermark.font_name)
    }

    /// Serialize the config to a pretty TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ValidationError(e.to_string()))
    }
}
