//! Configuration loading and discovery for `pxg.toml`
//!
//! Provides functions to find, load, and merge configuration.

use super::schema::PxgConfig;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the configuration file.
pub const CONFIG_FILE_NAME: &str = "pxg.toml";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse pxg.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// CLI arguments that can override config values
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub width: Option<usize>,
    pub height: Option<usize>,
    pub brush_size: Option<u32>,
    pub color: Option<String>,
    pub alpha: Option<u8>,
    pub scale: Option<u32>,
}

/// Find pxg.toml by walking up from the current working directory.
///
/// Search order:
/// 1. Walk up from current directory looking for pxg.toml
/// 2. Check XDG_CONFIG_HOME/pixelgrid/pxg.toml (or ~/.config/pixelgrid/pxg.toml)
pub fn find_config() -> Option<PathBuf> {
    if let Ok(cwd) = env::current_dir() {
        if let Some(path) = find_config_from(cwd) {
            return Some(path);
        }
    }

    find_xdg_config()
}

/// Find pxg.toml in the XDG config directory.
pub fn find_xdg_config() -> Option<PathBuf> {
    let xdg_config = env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|_| env::var("HOME").map(|h| PathBuf::from(h).join(".config")))
        .ok()?;

    let config_path = xdg_config.join("pixelgrid").join(CONFIG_FILE_NAME);
    if config_path.exists() {
        Some(config_path)
    } else {
        None
    }
}

/// Find pxg.toml by walking up from a specific directory.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load configuration from a pxg.toml file.
///
/// If a path is provided, loads from that file. Otherwise, uses `find_config()`
/// to locate the config file, falling back to defaults when none exists.
///
/// # Errors
/// `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_config(path: Option<&Path>) -> Result<PxgConfig, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    match config_path {
        Some(p) => {
            log::debug!("loading config from {}", p.display());
            load_config_file(&p)
        }
        None => Ok(PxgConfig::default()),
    }
}

/// Load configuration from a specific file path.
fn load_config_file(path: &Path) -> Result<PxgConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: PxgConfig = toml::from_str(&contents)?;

    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()));
    }

    Ok(config)
}

/// Merge CLI overrides into a configuration.
///
/// CLI arguments take precedence over config file values. The merged config is
/// validated again by the caller if it matters.
pub fn merge_cli_overrides(config: &mut PxgConfig, overrides: &CliOverrides) {
    if let Some(width) = overrides.width {
        config.editor.width = width;
    }
    if let Some(height) = overrides.height {
        config.editor.height = height;
    }
    if let Some(brush_size) = overrides.brush_size {
        config.editor.brush_size = brush_size;
    }
    if let Some(ref color) = overrides.color {
        config.editor.color = color.clone();
    }
    if let Some(alpha) = overrides.alpha {
        config.editor.alpha = alpha;
    }
    if let Some(scale) = overrides.scale {
        config.export.scale = scale;
    }
}
