//! Configuration module for Dexter

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::images::{DEFAULT_FETCH_TIMEOUT, DEFAULT_MAX_DIMENSION};
use crate::theme::Theme;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Selected theme
    #[serde(default)]
    pub theme: Theme,

    /// Seconds before an artwork download is abandoned
    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout_secs: u64,

    /// Artwork larger than this (in pixels, either side) is scaled down
    #[serde(default = "default_max_image_dimension")]
    pub max_image_dimension: u32,

    /// Whether to render artwork at all
    #[serde(default = "default_show_images")]
    pub show_images: bool,

    /// Custom placeholder image (built-in pokeball when unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder_path: Option<PathBuf>,
}

const fn default_fetch_timeout() -> u64 {
    DEFAULT_FETCH_TIMEOUT.as_secs()
}

const fn default_max_image_dimension() -> u32 {
    DEFAULT_MAX_DIMENSION
}

const fn default_show_images() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            fetch_timeout_secs: default_fetch_timeout(),
            max_image_dimension: default_max_image_dimension(),
            show_images: default_show_images(),
            placeholder_path: None,
        }
    }
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        crate::paths::config_path()
    }

    /// Load config from the default path or create default
    pub fn load() -> Result<Self> {
        let path = Self::default_path()?;
        Self::load_from(&path)
    }

    /// Load config from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path).context("Failed to read config file")?;
            toml::from_str(&content).context("Failed to parse config file")
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to the default path
    pub fn save(&self) -> Result<()> {
        let path = Self::default_path()?;
        self.save_to(&path)
    }

    /// Save config to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content).context("Failed to write config file")?;

        Ok(())
    }
}
