//! Raster export configuration

use crate::error::{CoreError, Result};
use crate::types::HexColor;
use serde::{Deserialize, Serialize};

/// Default output edge length in pixels
pub const DEFAULT_SIZE: u32 = 2048;

/// Default inset margin as a fraction of the edge length
pub const DEFAULT_MARGIN_FRACTION: f32 = 0.10;

/// Default file name prefix
pub const DEFAULT_FILE_PREFIX: &str = "QR";

pub const MIN_SIZE: u32 = 64;
pub const MAX_SIZE: u32 = 8192;
pub const MIN_MARGIN_FRACTION: f32 = 0.05;
pub const MAX_MARGIN_FRACTION: f32 = 0.10;

/// Export configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Output edge length (the image is always square)
    pub size: u32,

    /// Margin reserved on every side, as a fraction of `size`
    pub margin_fraction: f32,

    /// Opaque background fill
    pub background: HexColor,

    /// File name prefix (`<prefix>_<MODE>_<millis>.png`)
    pub file_prefix: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            margin_fraction: DEFAULT_MARGIN_FRACTION,
            background: HexColor::WHITE,
            file_prefix: DEFAULT_FILE_PREFIX.to_string(),
        }
    }
}

impl ExportConfig {
    /// Create with custom size
    pub fn with_size(mut self, size: u32) -> Self {
        self.size = size;
        self
    }

    /// Set margin fraction
    pub fn with_margin_fraction(mut self, fraction: f32) -> Self {
        self.margin_fraction = fraction;
        self
    }

    /// Set background colour
    pub fn with_background(mut self, background: HexColor) -> Self {
        self.background = background;
        self
    }

    /// Set file name prefix
    pub fn with_file_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.file_prefix = prefix.into();
        self
    }

    /// Margin in pixels
    pub fn margin(&self) -> f32 {
        self.size as f32 * self.margin_fraction
    }

    /// Check bounds
    ///
    /// # Errors
    /// - `InvalidConfig` if `size` is outside `MIN_SIZE..=MAX_SIZE`
    /// - `InvalidConfig` if `margin_fraction` is outside
    ///   `MIN_MARGIN_FRACTION..=MAX_MARGIN_FRACTION`
    /// - `InvalidConfig` if `file_prefix` is empty or contains a path separator
    pub fn validate(&self) -> Result<()> {
        if !(MIN_SIZE..=MAX_SIZE).contains(&self.size) {
            return Err(CoreError::InvalidConfig(format!(
                "size {} outside {}..={}",
                self.size, MIN_SIZE, MAX_SIZE
            )));
        }

        if !(MIN_MARGIN_FRACTION..=MAX_MARGIN_FRACTION).contains(&self.margin_fraction) {
            return Err(CoreError::InvalidConfig(format!(
                "margin fraction {} outside {}..={}",
                self.margin_fraction, MIN_MARGIN_FRACTION, MAX_MARGIN_FRACTION
            )));
        }

        if self.file_prefix.is_empty() || self.file_prefix.contains(['/', '\\']) {
            return Err(CoreError::InvalidConfig(format!(
                "invalid file prefix {:?}",
                self.file_prefix
            )));
        }

        Ok(())
    }
}
