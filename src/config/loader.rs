//! Configuration loading and discovery for `zxtex.toml`
//!
//! Provides functions to find, load, and merge configuration.

use super::schema::ZxtexConfig;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the configuration file.
pub const CONFIG_FILE_NAME: &str = "zxtex.toml";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse zxtex.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// CLI arguments that can override config values
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    /// Force raw single-line output
    pub raw: Option<bool>,
    /// Grid width
    pub width: Option<usize>,
    /// Explicit output path
    pub output: Option<PathBuf>,
    /// Transparent colour string
    pub transparent_color: Option<String>,
    /// Transparent palette index
    pub transparent_index: Option<u8>,
    /// PNG upscale factor
    pub scale: Option<u32>,
}

/// Find zxtex.toml by walking up from the current working directory.
///
/// Search order:
/// 1. Walk up from current directory looking for zxtex.toml
/// 2. Check XDG_CONFIG_HOME/zxtex/zxtex.toml (or ~/.config/zxtex/zxtex.toml)
pub fn find_config() -> Option<PathBuf> {
    if let Ok(cwd) = env::current_dir() {
        if let Some(path) = find_config_from(cwd) {
            return Some(path);
        }
    }

    find_xdg_config()
}

/// Find zxtex.toml in the XDG config directory.
pub fn find_xdg_config() -> Option<PathBuf> {
    let xdg_config = env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|_| env::var("HOME").map(|h| PathBuf::from(h).join(".config")))
        .ok()?;

    let config_path = xdg_config.join("zxtex").join(CONFIG_FILE_NAME);
    if config_path.exists() {
        Some(config_path)
    } else {
        None
    }
}

/// Find zxtex.toml by walking up from a specific directory.
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

/// Load configuration from a zxtex.toml file.
///
/// If a path is provided, loads from that file (which must exist). Otherwise
/// uses `find_config()`, falling back to defaults when nothing is found.
pub fn load_config(path: Option<&Path>) -> Result<ZxtexConfig, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    match config_path {
        Some(p) => {
            tracing::debug!(path = %p.display(), "loading config");
            load_config_file(&p)
        }
        None => Ok(ZxtexConfig::default()),
    }
}

/// Load configuration from a specific file path.
fn load_config_file(path: &Path) -> Result<ZxtexConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: ZxtexConfig = toml::from_str(&contents)?;

    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()));
    }

    Ok(config)
}

/// Merge CLI overrides into a configuration.
///
/// CLI arguments take precedence over config file values. The explicit
/// output path is not part of the file schema and is applied to the
/// conversion options by the caller.
pub fn merge_cli_overrides(config: &mut ZxtexConfig, overrides: &CliOverrides) {
    if let Some(raw) = overrides.raw {
        config.defaults.raw = raw;
    }

    if let Some(width) = overrides.width {
        config.defaults.width = width;
    }

    if let Some(scale) = overrides.scale {
        config.defaults.scale = scale;
    }

    if let Some(ref color) = overrides.transparent_color {
        config.transparency.color = Some(color.clone());
    }

    if let Some(index) = overrides.transparent_index {
        config.transparency.index = Some(index);
    }
}
