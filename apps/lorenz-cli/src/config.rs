//! Configuration for the lorenz CLI
//!
//! Values are read from a TOML file (`--config`, or
//! `<config dir>/lorenz/config.toml` when present) and then overridden by
//! command-line flags.

use std::path::{Path, PathBuf};

use lorenz_stats::DEFAULT_MAX_DISPLAY_POINTS;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LorenzConfig {
    /// Column selection
    pub columns: ColumnsConfig,
    /// Sort direction
    pub ordering: OrderingConfig,
    /// Curve rendering
    pub plot: PlotConfig,
    /// Input parsing
    pub input: InputConfig,
}

/// Column selection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnsConfig {
    pub outcome: Option<String>,
    pub rank: Option<String>,
    pub weight: Option<String>,
}

/// Sort direction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderingConfig {
    /// Rank ascending (curve under the diagonal)
    pub ascending: bool,
}

impl Default for OrderingConfig {
    fn default() -> Self {
        Self { ascending: true }
    }
}

/// Curve rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    /// Upper bound on plotted points before thinning kicks in
    pub max_points: usize,
    /// Plot width in pixels
    pub width: u32,
    /// Plot height in pixels
    pub height: u32,
    /// Optional plot title
    pub title: Option<String>,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            max_points: DEFAULT_MAX_DISPLAY_POINTS,
            width: 640,
            height: 480,
            title: None,
        }
    }
}

/// Input parsing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Field delimiter; inferred from the file extension when unset
    pub delimiter: Option<char>,
    /// Whether the first record is a header
    pub has_header: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            has_header: true,
        }
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Value out of range: {0}")]
    OutOfRange(String),
}

impl LorenzConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Serialize configuration to TOML
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&contents)
    }

    /// Default config file location
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("lorenz").join("config.toml"))
    }

    /// Load the default config file if it exists, otherwise defaults
    pub fn load_default() -> Result<Self, ConfigError> {
        match Self::default_path() {
            Some(path) if path.is_file() => {
                tracing::debug!("Loading config from {:?}", path);
                Self::load(&path)
            }
            _ => Ok(Self::default()),
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.plot.max_points == 0 {
            return Err(ConfigError::OutOfRange(
                "plot.max_points must be positive".to_string(),
            ));
        }

        if self.plot.width == 0 || self.plot.height == 0 {
            return Err(ConfigError::OutOfRange(format!(
                "plot dimensions must be positive, got {}x{}",
                self.plot.width, self.plot.height
            )));
        }

        if let Some(delimiter) = self.input.delimiter {
            if !delimiter.is_ascii() {
                return Err(ConfigError::OutOfRange(format!(
                    "input.delimiter must be a single ASCII character, got {:?}",
                    delimiter
                )));
            }
        }

        Ok(())
    }
}
