//! CLI configuration.
//!
//! Defaults for the `thumbnail` and `compress` commands load from an
//! optional `config.toml`:
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [thumbnail]
//! aspect_ratio = [1, 1]   # width:height ratio of the crop
//! short_edge = 256        # size of the shorter edge in pixels
//! quality = 90            # lossy encoding quality (1-100)
//! sharpen = true          # light unsharp mask after downscaling
//!
//! [archive]
//! level = 6               # gzip/xz/tar.gz compression level (0-9)
//! ```
//!
//! Config files are sparse; override just the values you want. Unknown
//! keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::imaging::thumbnail::{Sharpen, ThumbnailSpec};
use crate::imaging::Quality;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("config validation error: {0}")]
    Validation(String),
}

/// Tool configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolConfig {
    pub thumbnail: ThumbnailSection,
    pub archive: ArchiveSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThumbnailSection {
    pub aspect_ratio: [u32; 2],
    pub short_edge: u32,
    pub quality: Quality,
    pub sharpen: bool,
}

impl Default for ThumbnailSection {
    fn default() -> Self {
        Self {
            aspect_ratio: [1, 1],
            short_edge: 256,
            quality: Quality::default(),
            sharpen: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ArchiveSection {
    pub level: u32,
}

impl Default for ArchiveSection {
    fn default() -> Self {
        Self {
            level: crate::archive::DEFAULT_LEVEL,
        }
    }
}

impl ToolConfig {
    /// Load and validate a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path` when it exists, otherwise fall back to defaults.
    pub fn load_optional(path: &Path) -> Result<Self, ConfigError> {
        if path.is_file() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let [aw, ah] = self.thumbnail.aspect_ratio;
        if aw == 0 || ah == 0 {
            return Err(ConfigError::Validation(format!(
                "thumbnail.aspect_ratio components must be positive, got [{aw}, {ah}]"
            )));
        }
        if self.thumbnail.short_edge == 0 {
            return Err(ConfigError::Validation(
                "thumbnail.short_edge must be at least 1".to_string(),
            ));
        }
        if self.archive.level > 9 {
            return Err(ConfigError::Validation(format!(
                "archive.level must be 0-9, got {}",
                self.archive.level
            )));
        }
        Ok(())
    }

    /// The thumbnail spec this config describes.
    pub fn thumbnail_spec(&self) -> ThumbnailSpec {
        ThumbnailSpec {
            aspect: (self.thumbnail.aspect_ratio[0], self.thumbnail.aspect_ratio[1]),
            short_edge: self.thumbnail.short_edge,
            quality: self.thumbnail.quality,
            sharpen: self.thumbnail.sharpen.then(Sharpen::light),
        }
    }
}
