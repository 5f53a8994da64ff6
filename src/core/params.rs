use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::CollisionPolicy;

/// Hole-filling settings for the ground-to-slant direction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GapFillParams {
    /// Maximum distance (pixels) searched for valid samples; 0 disables filling
    pub search_radius: f64,
    /// Smoothing passes run over the filled pixels
    pub smoothing_iterations: u32,
}

impl Default for GapFillParams {
    fn default() -> Self {
        Self {
            search_radius: 5.0,
            smoothing_iterations: 0,
        }
    }
}

/// Projection parameters suitable for config files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionParams {
    pub gap_fill: GapFillParams,
    pub collision: CollisionPolicy,
    /// Write provenance metadata items into the output GeoTIFF
    pub embed_metadata: bool,
}

impl Default for ProjectionParams {
    fn default() -> Self {
        Self {
            gap_fill: GapFillParams::default(),
            collision: CollisionPolicy::LastWrite,
            embed_metadata: true,
        }
    }
}

impl ProjectionParams {
    /// Load parameters from a JSON file; missing keys keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
