//! Configuration schema types for `zxtex.toml`
//!
//! Defines the structure and validation rules for per-project defaults.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::codec::{Encoding, MAX_WIDTH};
use crate::convert::{ConvertOptions, DEFAULT_OUTPUT};
use crate::image_io::MAX_SCALE;
use crate::palette::PALETTE_SIZE;
use crate::transparency::TransparencyConfig;

/// Default conversion settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Write image -> text output as a single raw line
    #[serde(default)]
    pub raw: bool,
    /// Grid width for text -> image (0 = infer)
    #[serde(default)]
    pub width: usize,
    /// Integer upscale factor for PNG output
    #[serde(default = "default_scale")]
    pub scale: u32,
    /// PNG name used when the text has no `file:` header
    #[serde(default = "default_output")]
    pub output: PathBuf,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self { raw: false, width: 0, scale: default_scale(), output: default_output() }
    }
}

fn default_scale() -> u32 {
    1
}

fn default_output() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT)
}

/// Transparency overrides section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransparencySection {
    /// Exact colour treated as transparent (e.g. "#FF00FF")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Palette index treated as transparent (0-15)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<u8>,
}

/// Root `zxtex.toml` structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZxtexConfig {
    /// Conversion defaults
    #[serde(default)]
    pub defaults: DefaultsConfig,
    /// Transparency overrides
    #[serde(default)]
    pub transparency: TransparencySection,
}

/// Configuration validation error
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "defaults.scale")
    pub field: String,
    /// Error message
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "zxtex.toml: '{}' {}", self.field, self.message)
    }
}

impl ZxtexConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        if !(1..=MAX_SCALE).contains(&self.defaults.scale) {
            errors.push(ConfigValidationError {
                field: "defaults.scale".to_string(),
                message: format!("must be between 1 and {}", MAX_SCALE),
            });
        }

        if self.defaults.width > MAX_WIDTH {
            errors.push(ConfigValidationError {
                field: "defaults.width".to_string(),
                message: format!("must be at most {}", MAX_WIDTH),
            });
        }

        if self.defaults.output.as_os_str().is_empty() {
            errors.push(ConfigValidationError {
                field: "defaults.output".to_string(),
                message: "must not be empty".to_string(),
            });
        }

        if let Some(index) = self.transparency.index {
            if index as usize >= PALETTE_SIZE {
                errors.push(ConfigValidationError {
                    field: "transparency.index".to_string(),
                    message: format!("must be between 0 and {}", PALETTE_SIZE - 1),
                });
            }
        }

        errors
    }

    /// Check if validation passed
    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// Build the options for one conversion.
    ///
    /// A malformed transparency colour turns that override off.
    pub fn to_convert_options(&self) -> ConvertOptions {
        ConvertOptions {
            encoding: if self.defaults.raw { Encoding::Raw } else { Encoding::Rows },
            width: self.defaults.width,
            output: None,
            transparency: TransparencyConfig::from_settings(
                self.transparency.color.as_deref(),
                self.transparency.index,
            ),
            scale: self.defaults.scale,
            default_output: self.defaults.output.clone(),
        }
    }
}
