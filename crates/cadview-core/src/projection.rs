use crate::geom::Vec2;
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Two model-space vectors spanning a viewing plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionBasis {
    pub basis_x: Vector3<f64>,
    pub basis_y: Vector3<f64>,
    #[serde(default)]
    pub invert_x: bool,
    #[serde(default)]
    pub invert_y: bool,
}

impl ProjectionBasis {
    pub fn new(basis_x: Vector3<f64>, basis_y: Vector3<f64>) -> Self {
        Self {
            basis_x,
            basis_y,
            invert_x: false,
            invert_y: false,
        }
    }

    pub fn inverted(mut self, invert_x: bool, invert_y: bool) -> Self {
        self.invert_x = invert_x;
        self.invert_y = invert_y;
        self
    }

    pub fn project_point(&self, p: &Point3<f64>) -> Vec2 {
        let x = self.basis_x.dot(&p.coords);
        let y = self.basis_y.dot(&p.coords);
        Vec2::new(
            if self.invert_x { -x } else { x },
            if self.invert_y { -y } else { y },
        )
    }
}

pub fn project(points: &[Point3<f64>], basis: &ProjectionBasis) -> Vec<Vec2> {
    points.iter().map(|p| basis.project_point(p)).collect()
}
