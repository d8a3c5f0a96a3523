use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::Result;

/// Top-level configuration structure for the application.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub surface: SurfaceConfig,
    pub export: ExportConfig,
}

impl AppConfig {
    /// Reads a JSON config file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(?path, "config file not found, using defaults");
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}

/// Geometry of the drawing surface and the curve sampling density.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    pub width: f64,
    pub height: f64,
    /// Gap between the curve's bounding circle and the surface edge.
    pub margin: f64,
    /// Number of polyline segments; the curve has `segments + 1` points.
    pub segments: usize,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            width: 400.0,
            height: 400.0,
            margin: 40.0,
            segments: 1000,
        }
    }
}

/// Where exported cards are written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub output_dir: PathBuf,
    pub file_name: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            file_name: crate::export::CARD_FILE_NAME.to_string(),
        }
    }
}
