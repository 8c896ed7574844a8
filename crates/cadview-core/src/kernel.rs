//! Seam to the CAD kernel that owns shapes, tessellation and curve evaluation.
//!
//! The pipelines only ever call through this trait. Hosts construct and
//! initialise a kernel once (locating native libraries and so on) and pass a
//! reference into each invocation; nothing here touches process state.

use crate::error::KernelError;
use crate::geom::{Aabb3, Plane, Vec2};
use crate::model::Mesh;
use nalgebra::{Point3, Vector3};

pub trait CadKernel {
    /// A loaded solid or compound.
    type Shape;
    /// A 3D boundary curve (from HLR or a section).
    type Edge;
    /// A curve already lying in the 2D frame of an outline projection.
    type ViewEdge;

    fn tessellate(&self, shape: &Self::Shape, linear_deflection: f64)
        -> Result<Mesh, KernelError>;

    /// Outline projection of `shape` seen along `direction`.
    fn shape_view(
        &self,
        shape: &Self::Shape,
        direction: Vector3<f64>,
    ) -> Result<Vec<Self::ViewEdge>, KernelError>;

    fn sample_view_edge(&self, edge: &Self::ViewEdge, samples: usize)
        -> Result<Vec<Vec2>, KernelError>;

    fn view_edge_endpoints(&self, edge: &Self::ViewEdge) -> (Vec2, Vec2);

    /// Edges left visible after hidden-line removal along `direction`.
    fn visible_edges(
        &self,
        shape: &Self::Shape,
        direction: Vector3<f64>,
    ) -> Result<Vec<Self::Edge>, KernelError>;

    /// `Ok(None)` when the shape has no extent at all.
    fn bounding_box(&self, shape: &Self::Shape) -> Result<Option<Aabb3>, KernelError>;

    fn section(&self, shape: &Self::Shape, plane: &Plane) -> Result<Vec<Self::Edge>, KernelError>;

    fn sample_edge(&self, edge: &Self::Edge, target_points: usize)
        -> Result<Vec<Point3<f64>>, KernelError>;

    fn edge_endpoints(&self, edge: &Self::Edge) -> (Point3<f64>, Point3<f64>);
}
