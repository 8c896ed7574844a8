//! A [`CadKernel`] over plain triangle meshes.
//!
//! Lets the projection pipelines run without a B-rep kernel: outlines and
//! hidden lines come from the mesh's feature and silhouette edges, sections
//! from plane/triangle intersection.

pub mod frame;
mod hidden;
pub mod section;
pub mod shape;
pub mod stl;

use cadview_core::error::{GeometryError, KernelError};
use cadview_core::geom::{Aabb3, Plane, Vec2};
use cadview_core::kernel::CadKernel;
use cadview_core::model::Mesh;
use frame::ViewFrame;
use hidden::OcclusionGrid;
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

pub use shape::{EdgeKind, MeshEdge, MeshShape};
pub use stl::StlError;

/// A straight 3D edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineEdge {
    pub start: Point3<f64>,
    pub end: Point3<f64>,
}

impl LineEdge {
    pub fn new(start: Point3<f64>, end: Point3<f64>) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }
}

/// A straight edge in the 2D frame of an outline view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewEdge {
    pub start: Vec2,
    pub end: Vec2,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshKernelConfig {
    /// Dihedral angle (degrees) above which a mesh edge counts as a feature edge.
    pub sharp_angle_deg: f64,
    /// Spans per edge tested for occlusion during hidden-line removal.
    pub visibility_spans: usize,
    pub weld_tolerance: f64,
    pub section_tolerance: f64,
}

impl Default for MeshKernelConfig {
    fn default() -> Self {
        Self {
            sharp_angle_deg: 30.0,
            visibility_spans: 16,
            weld_tolerance: 1e-6,
            section_tolerance: 1e-9,
        }
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error(transparent)]
    Stl(#[from] StlError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

#[derive(Debug, Clone, Default)]
pub struct MeshKernel {
    cfg: MeshKernelConfig,
}

impl MeshKernel {
    pub fn new(cfg: MeshKernelConfig) -> Self {
        Self { cfg }
    }

    pub fn shape_from_mesh(&self, mesh: Mesh) -> Result<MeshShape, GeometryError> {
        MeshShape::new(mesh, self.cfg.sharp_angle_deg)
    }

    pub fn load_stl(&self, path: &Path) -> Result<MeshShape, LoadError> {
        let data = std::fs::read(path).map_err(|source| LoadError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let mesh = stl::parse_stl(&data, self.cfg.weld_tolerance)?;
        tracing::info!(
            path = %path.display(),
            vertices = mesh.vertices.len(),
            triangles = mesh.triangles.len(),
            "loaded STL"
        );
        Ok(self.shape_from_mesh(mesh)?)
    }

    fn frame(&self, operation: &'static str, direction: Vector3<f64>) -> Result<ViewFrame, KernelError> {
        ViewFrame::looking_along(direction)
            .ok_or_else(|| KernelError::new(operation, format!("invalid view direction {direction:?}")))
    }
}

impl CadKernel for MeshKernel {
    type Shape = MeshShape;
    type Edge = LineEdge;
    type ViewEdge = ViewEdge;

    fn tessellate(&self, shape: &MeshShape, linear_deflection: f64) -> Result<Mesh, KernelError> {
        if !(linear_deflection > 0.0) {
            return Err(KernelError::new(
                "tessellate",
                format!("linear deflection must be positive, got {linear_deflection}"),
            ));
        }
        // Already faceted; the deflection cannot refine it further.
        Ok(shape.mesh().clone())
    }

    fn shape_view(&self, shape: &MeshShape, direction: Vector3<f64>) -> Result<Vec<ViewEdge>, KernelError> {
        let frame = self.frame("shape_view", direction)?;
        let edges = shape
            .drawing_edges(&frame.direction)
            .map(|e| ViewEdge {
                start: frame.project(&shape.vertex(e.v0)),
                end: frame.project(&shape.vertex(e.v1)),
            })
            .filter(|e| e.start.distance(&e.end) > f64::EPSILON)
            .collect();
        Ok(edges)
    }

    fn sample_view_edge(&self, edge: &ViewEdge, samples: usize) -> Result<Vec<Vec2>, KernelError> {
        if samples < 2 {
            return Err(KernelError::new("sample_view_edge", format!("{samples} samples requested")));
        }
        let last = (samples - 1) as f64;
        Ok((0..samples)
            .map(|i| edge.start.lerp(&edge.end, i as f64 / last))
            .collect())
    }

    fn view_edge_endpoints(&self, edge: &ViewEdge) -> (Vec2, Vec2) {
        (edge.start, edge.end)
    }

    fn visible_edges(&self, shape: &MeshShape, direction: Vector3<f64>) -> Result<Vec<LineEdge>, KernelError> {
        let frame = self.frame("visible_edges", direction)?;
        let grid = OcclusionGrid::new(shape, frame);
        let mut visible = Vec::new();
        for e in shape.drawing_edges(&frame.direction) {
            let (a, b) = (shape.vertex(e.v0), shape.vertex(e.v1));
            let along = b - a;
            let len = along.norm();
            // Edges parallel to the view collapse to a point.
            if len <= f64::EPSILON || (along / len).dot(&frame.direction).abs() > 1.0 - 1e-9 {
                continue;
            }
            visible.extend(grid.visible_runs(a, b, self.cfg.visibility_spans));
        }
        tracing::debug!(edges = visible.len(), "hidden-line removal done");
        Ok(visible)
    }

    fn bounding_box(&self, shape: &MeshShape) -> Result<Option<Aabb3>, KernelError> {
        Ok(shape.bounding_box())
    }

    fn section(&self, shape: &MeshShape, plane: &Plane) -> Result<Vec<LineEdge>, KernelError> {
        if !(plane.normal.norm() > 0.0) {
            return Err(KernelError::new("section", "plane has a zero normal"));
        }
        Ok(section::intersect_shape_with_plane(
            shape,
            plane,
            self.cfg.section_tolerance,
        ))
    }

    fn sample_edge(&self, edge: &LineEdge, target_points: usize) -> Result<Vec<Point3<f64>>, KernelError> {
        if target_points < 2 {
            return Err(KernelError::new("sample_edge", format!("{target_points} points requested")));
        }
        if edge.length() <= self.cfg.section_tolerance {
            return Err(KernelError::new("sample_edge", "edge has no length"));
        }
        let last = (target_points - 1) as f64;
        Ok((0..target_points)
            .map(|i| edge.start + (edge.end - edge.start) * (i as f64 / last))
            .collect())
    }

    fn edge_endpoints(&self, edge: &LineEdge) -> (Point3<f64>, Point3<f64>) {
        (edge.start, edge.end)
    }
}
