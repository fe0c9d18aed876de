//! Common paths for Dexter data storage
//!
//! Dexter keeps its files under ~/.config/dexter/ on all platforms:
//! - config.toml - User configuration

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// Get the Dexter data directory (~/.config/dexter/)
pub fn dexter_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    let dexter_dir = home.join(".config").join("dexter");
    fs::create_dir_all(&dexter_dir).context("Failed to create dexter directory")?;
    Ok(dexter_dir)
}

/// Get the config file path (~/.config/dexter/config.toml)
pub fn config_path() -> Result<PathBuf> {
    Ok(dexter_dir()?.join("config.toml"))
}
