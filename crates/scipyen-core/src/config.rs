//! Configuration for planar graphics
//!
//! Every setting that used to live in class-level registries is an explicit
//! struct here, constructed by the caller and passed where it is needed.
//! Supports JSON and TOML files.
//!
//! Configuration is organized into logical sections:
//! - Geometry settings (curve flattening tolerance)
//! - Frame settings (frame range scanned by inspection tools)
//! - Cursor defaults (window and radius geometry)
//! - Label settings (auto-naming prefixes)

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Geometry settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometrySettings {
    /// Tolerance used when flattening curves to measure their length
    pub curve_tolerance: f64,
}

impl Default for GeometrySettings {
    fn default() -> Self {
        Self {
            curve_tolerance: 0.1,
        }
    }
}

/// Frame settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSettings {
    /// Number of frames reported by inspection tools when a document does
    /// not say otherwise
    pub default_frame_count: usize,
}

impl Default for FrameSettings {
    fn default() -> Self {
        Self {
            default_frame_count: 1,
        }
    }
}

/// Default geometry for new cursors
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CursorDefaults {
    /// Horizontal extent of the cursor line(s)
    pub width: f64,
    /// Vertical extent of the cursor line(s)
    pub height: f64,
    /// Width of the hit-test window
    pub xwindow: f64,
    /// Height of the hit-test window
    pub ywindow: f64,
    /// Radius of point-cursor windows
    pub radius: f64,
}

impl Default for CursorDefaults {
    fn default() -> Self {
        Self {
            width: 100.0,
            height: 100.0,
            xwindow: 10.0,
            ywindow: 10.0,
            radius: 5.0,
        }
    }
}

/// Auto-naming settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct LabelSettings {
    /// Overrides for the built-in label prefix of a kind, keyed by that prefix
    #[serde(default)]
    pub prefixes: HashMap<String, String>,
    /// Text placed between prefix and index
    #[serde(default)]
    pub separator: String,
}

impl LabelSettings {
    /// Resolve a built-in prefix through the configured overrides
    pub fn prefix_for<'a>(&'a self, builtin: &'a str) -> &'a str {
        self.prefixes
            .get(builtin)
            .map(String::as_str)
            .unwrap_or(builtin)
    }

    /// Produce `<prefix><separator><n>` with the smallest `n` not already in `existing`
    pub fn next_name<'a>(
        &self,
        builtin_prefix: &str,
        existing: impl IntoIterator<Item = &'a str>,
    ) -> String {
        let prefix = self.prefix_for(builtin_prefix);
        let taken: Vec<&str> = existing.into_iter().collect();
        let mut index = 0usize;
        loop {
            let candidate = format!("{}{}{}", prefix, self.separator, index);
            if !taken.contains(&candidate.as_str()) {
                return candidate;
            }
            index += 1;
        }
    }
}

/// Complete planar-graphics configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PlanarConfig {
    /// Geometry settings
    #[serde(default)]
    pub geometry: GeometrySettings,
    /// Frame settings
    #[serde(default)]
    pub frames: FrameSettings,
    /// Cursor defaults
    #[serde(default)]
    pub cursors: CursorDefaults,
    /// Auto-naming settings
    #[serde(default)]
    pub labels: LabelSettings,
}

impl PlanarConfig {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Platform location of the user configuration file
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("scipyen").join("planar.toml"))
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::other(format!("Failed to read config file: {}", e)))?;

        let config: Self = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content)
                .map_err(|e| Error::other(format!("Invalid JSON config: {}", e)))?
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            toml::from_str(&content)
                .map_err(|e| Error::other(format!("Invalid TOML config: {}", e)))?
        } else {
            return Err(Error::other("Config file must be .json or .toml"));
        };

        config.validate()?;
        tracing::debug!("Loaded planar config from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        self.validate()?;

        let content = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::to_string_pretty(self)
                .map_err(|e| Error::other(format!("Failed to serialize config: {}", e)))?
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            toml::to_string_pretty(self)
                .map_err(|e| Error::other(format!("Failed to serialize config: {}", e)))?
        } else {
            return Err(Error::other("Config file must be .json or .toml"));
        };

        std::fs::write(path, content)
            .map_err(|e| Error::other(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let tolerance = self.geometry.curve_tolerance;
        if tolerance.is_nan() || tolerance <= 0.0 {
            return Err(Error::other("Curve tolerance must be > 0"));
        }

        if self.frames.default_frame_count == 0 {
            return Err(Error::other("Default frame count must be > 0"));
        }

        let c = &self.cursors;
        if [c.width, c.height, c.xwindow, c.ywindow, c.radius]
            .iter()
            .any(|v| !v.is_finite() || *v < 0.0)
        {
            return Err(Error::other("Cursor geometry must be finite and >= 0"));
        }

        Ok(())
    }
}
