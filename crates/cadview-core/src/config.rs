use crate::normalize::NormalizeConfig;
use crate::view::{default_outline_directions, NamedDirection};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Linear deflection handed to kernel tessellation, in model units.
    pub linear_deflection: f64,
    /// Samples per edge of an outline projection.
    pub outline_samples: usize,
    /// Target samples per edge for hidden-line and section curves.
    pub curve_samples: usize,
    pub outline_directions: Vec<NamedDirection>,
    /// Emit each undirected triangle edge once instead of once per triangle.
    pub dedup_triangle_edges: bool,
    pub normalize: NormalizeConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            linear_deflection: 0.25,
            outline_samples: 50,
            curve_samples: 80,
            outline_directions: default_outline_directions(),
            dedup_triangle_edges: false,
            normalize: NormalizeConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapConfig {
    /// Maximum snapping distance in normalized units.
    pub threshold: f64,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self { threshold: 0.08 }
    }
}
