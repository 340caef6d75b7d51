use std::fs;
use std::path::Path;

use log::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{
    DEFAULT_HEIGHT, DEFAULT_PALETTE_COLUMNS, DEFAULT_PALETTE_ROWS, DEFAULT_UNDO_LENGTH,
    DEFAULT_WIDTH, MAX_GRID_DIMENSION,
};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Cannot write configuration: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// Editor settings, read from `art_editor.toml`. Missing keys take their defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Size of the texture a new session starts with.
    pub width: usize,
    pub height: usize,
    /// Number of undo (and redo) steps kept.
    pub undo_length: usize,
    /// Canvas cell height in points.
    pub zoom: f32,
    pub palette_columns: usize,
    pub palette_rows: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            undo_length: DEFAULT_UNDO_LENGTH,
            zoom: 20.0,
            palette_columns: DEFAULT_PALETTE_COLUMNS,
            palette_rows: DEFAULT_PALETTE_ROWS,
        }
    }
}

impl EditorConfig {
    /// Reads the configuration, falling back to the defaults if the file does not exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            debug!("No configuration at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let text = fs::read_to_string(path)?;
        let config = Self::from_toml(&text)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid =
            |field: &'static str, reason: String| Err(ConfigError::InvalidValue { field, reason });
        let dimension = 1..=MAX_GRID_DIMENSION;

        if !dimension.contains(&self.width) {
            return invalid("width", format!("must be between 1 and {}", MAX_GRID_DIMENSION));
        }
        if !dimension.contains(&self.height) {
            return invalid("height", format!("must be between 1 and {}", MAX_GRID_DIMENSION));
        }
        if self.undo_length == 0 {
            return invalid("undo_length", "must be at least 1".to_string());
        }
        if !(self.zoom.is_finite() && self.zoom > 0.0) {
            return invalid("zoom", "must be a positive number".to_string());
        }
        if self.palette_columns == 0 || self.palette_rows == 0 {
            return invalid("palette", "needs at least one column and one row".to_string());
        }
        Ok(())
    }
}
