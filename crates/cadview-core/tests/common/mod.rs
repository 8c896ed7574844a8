#![allow(dead_code)]

use cadview_core::error::KernelError;
use cadview_core::geom::{Aabb3, Plane, Vec2};
use cadview_core::kernel::CadKernel;
use cadview_core::model::Mesh;
use nalgebra::{Point3, Vector3};
use std::cell::{Cell, RefCell};

/// Unit cube, 8 vertices and 12 triangles.
pub fn cube_mesh() -> Mesh {
    let vertices = vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(1.0, 1.0, 0.0),
        Point3::new(0.0, 1.0, 0.0),
        Point3::new(0.0, 0.0, 1.0),
        Point3::new(1.0, 0.0, 1.0),
        Point3::new(1.0, 1.0, 1.0),
        Point3::new(0.0, 1.0, 1.0),
    ];
    #[rustfmt::skip]
    let triangles = vec![
        [0, 2, 1], [0, 3, 2], // bottom
        [4, 5, 6], [4, 6, 7], // top
        [0, 1, 5], [0, 5, 4], // front
        [2, 3, 7], [2, 7, 6], // back
        [0, 4, 7], [0, 7, 3], // left
        [1, 2, 6], [1, 6, 5], // right
    ];
    Mesh::new(vertices, triangles)
}

#[derive(Debug, Clone)]
pub struct FakeEdge {
    pub points: Vec<Point3<f64>>,
    pub fail: bool,
}

impl FakeEdge {
    pub fn line(a: [f64; 3], b: [f64; 3]) -> Self {
        Self {
            points: vec![Point3::from(a), Point3::from(b)],
            fail: false,
        }
    }

    pub fn failing(a: [f64; 3], b: [f64; 3]) -> Self {
        Self {
            fail: true,
            ..Self::line(a, b)
        }
    }
}

#[derive(Debug, Clone)]
pub struct FakeViewEdge {
    pub points: Vec<Vec2>,
    pub fail: bool,
}

impl FakeViewEdge {
    pub fn line(a: (f64, f64), b: (f64, f64)) -> Self {
        Self {
            points: vec![Vec2::new(a.0, a.1), Vec2::new(b.0, b.1)],
            fail: false,
        }
    }
}

/// Scripted kernel that records how it was called.
#[derive(Default)]
pub struct FakeKernel {
    pub mesh: Mesh,
    pub view_edges: Vec<FakeViewEdge>,
    pub visible: Vec<FakeEdge>,
    pub bbox: Option<Aabb3>,
    pub section_edges: Vec<FakeEdge>,
    pub tessellate_calls: Cell<usize>,
    pub directions: RefCell<Vec<Vector3<f64>>>,
    pub planes: RefCell<Vec<Plane>>,
}

impl CadKernel for FakeKernel {
    type Shape = ();
    type Edge = FakeEdge;
    type ViewEdge = FakeViewEdge;

    fn tessellate(&self, _shape: &(), _linear_deflection: f64) -> Result<Mesh, KernelError> {
        self.tessellate_calls.set(self.tessellate_calls.get() + 1);
        Ok(self.mesh.clone())
    }

    fn shape_view(&self, _shape: &(), direction: Vector3<f64>) -> Result<Vec<FakeViewEdge>, KernelError> {
        self.directions.borrow_mut().push(direction);
        Ok(self.view_edges.clone())
    }

    fn sample_view_edge(&self, edge: &FakeViewEdge, samples: usize) -> Result<Vec<Vec2>, KernelError> {
        if edge.fail {
            return Err(KernelError::new("sample_view_edge", "scripted failure"));
        }
        let (a, b) = self.view_edge_endpoints(edge);
        let last = (samples - 1) as f64;
        Ok((0..samples).map(|i| a.lerp(&b, i as f64 / last)).collect())
    }

    fn view_edge_endpoints(&self, edge: &FakeViewEdge) -> (Vec2, Vec2) {
        (edge.points[0], edge.points[edge.points.len() - 1])
    }

    fn visible_edges(&self, _shape: &(), direction: Vector3<f64>) -> Result<Vec<FakeEdge>, KernelError> {
        self.directions.borrow_mut().push(direction);
        Ok(self.visible.clone())
    }

    fn bounding_box(&self, _shape: &()) -> Result<Option<Aabb3>, KernelError> {
        Ok(self.bbox)
    }

    fn section(&self, _shape: &(), plane: &Plane) -> Result<Vec<FakeEdge>, KernelError> {
        self.planes.borrow_mut().push(*plane);
        Ok(self.section_edges.clone())
    }

    fn sample_edge(&self, edge: &FakeEdge, _target_points: usize) -> Result<Vec<Point3<f64>>, KernelError> {
        if edge.fail {
            return Err(KernelError::new("sample_edge", "scripted failure"));
        }
        Ok(edge.points.clone())
    }

    fn edge_endpoints(&self, edge: &FakeEdge) -> (Point3<f64>, Point3<f64>) {
        (edge.points[0], edge.points[edge.points.len() - 1])
    }
}
