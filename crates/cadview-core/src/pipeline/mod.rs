//! View-generation pipelines.
//!
//! Every pipeline is a pure function of the kernel, the shape and the
//! configuration. It either returns the full [`ViewSet`] or fails as a whole.

pub mod hidden_line;
pub mod isometric;
pub mod orthographic;
pub mod outline;
pub mod section;

use crate::config::PipelineConfig;
use crate::discretize::discretize_edge;
use crate::geom::Vec2;
use crate::kernel::CadKernel;
use crate::model::{
    Diagnostics, Mesh, MeshViewMetadata, SegmentViewMetadata, ViewSegment, ViewSet,
};
use crate::normalize::{normalize, NormalizeConfig};
use crate::projection::{project, ProjectionBasis};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Pipeline {
    Orthographic,
    Outline,
    HiddenLine,
    Section,
    IsometricOutline,
    IsometricMesh,
}

impl Pipeline {
    pub const ALL: [Pipeline; 6] = [
        Pipeline::Orthographic,
        Pipeline::Outline,
        Pipeline::HiddenLine,
        Pipeline::Section,
        Pipeline::IsometricOutline,
        Pipeline::IsometricMesh,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Pipeline::Orthographic => "orthographic",
            Pipeline::Outline => "outline",
            Pipeline::HiddenLine => "hidden-line",
            Pipeline::Section => "section",
            Pipeline::IsometricOutline => "isometric-outline",
            Pipeline::IsometricMesh => "isometric-mesh",
        }
    }

    /// Pipelines that start from the tessellated mesh.
    pub fn needs_mesh(self) -> bool {
        matches!(self, Pipeline::Orthographic | Pipeline::IsometricMesh)
    }
}

impl fmt::Display for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown pipeline '{0}'")]
pub struct UnknownPipeline(pub String);

impl FromStr for Pipeline {
    type Err = UnknownPipeline;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        Pipeline::ALL
            .into_iter()
            .find(|p| p.name() == wanted)
            .ok_or_else(|| UnknownPipeline(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PipelineOutput {
    pub views: ViewSet,
    pub diagnostics: Diagnostics,
}

/// Projects every mesh vertex once, then indexes triangle edges into that
/// shared array so adjacent triangles always agree on vertex coordinates.
pub(crate) fn mesh_view(
    mesh: &Mesh,
    basis: &ProjectionBasis,
    cfg: &PipelineConfig,
) -> MeshViewMetadata {
    let raw = project(&mesh.vertices, basis);
    let (projected_vertices, bounds) = normalize(&raw, &cfg.normalize);
    MeshViewMetadata {
        projected_vertices,
        edges: triangle_edges(mesh, cfg.dedup_triangle_edges),
        bounds,
    }
}

fn triangle_edges(mesh: &Mesh, dedup: bool) -> Vec<[u32; 2]> {
    if !dedup {
        return mesh.triangle_edges().collect();
    }
    let mut seen = HashSet::new();
    mesh.triangle_edges()
        .filter(|&[a, b]| seen.insert((a.min(b), a.max(b))))
        .collect()
}

/// Normalizes all polyline points jointly and splits each polyline into
/// segments between consecutive samples. Polylines are never joined.
pub(crate) fn segment_view(polylines: &[Vec<Vec2>], cfg: &NormalizeConfig) -> SegmentViewMetadata {
    let raw: Vec<Vec2> = polylines.iter().flatten().copied().collect();
    let (norm, bounds) = normalize(&raw, cfg);

    let mut segments = Vec::with_capacity(raw.len());
    let mut offset = 0;
    for line in polylines {
        for (a, b) in (offset..offset + line.len()).tuple_windows() {
            segments.push(ViewSegment {
                start: norm[a],
                end: norm[b],
                world_start: raw[a],
                world_end: raw[b],
            });
        }
        offset += line.len();
    }
    SegmentViewMetadata { segments, bounds }
}

/// Discretizes 3D kernel edges and projects each sample with `basis`.
pub(crate) fn project_edges<K: CadKernel>(
    kernel: &K,
    edges: &[K::Edge],
    basis: &ProjectionBasis,
    target_points: usize,
    diag: &mut Diagnostics,
) -> Vec<Vec<Vec2>> {
    edges
        .iter()
        .filter_map(|edge| discretize_edge(kernel, edge, target_points, diag))
        .map(|points| project(&points, basis))
        .collect()
}
