use cadview_core::geom::Vec2;
use nalgebra::{Point3, Vector3};

/// Right/up axes of a viewer placed on the `+direction` side of the model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewFrame {
    pub direction: Vector3<f64>,
    pub right: Vector3<f64>,
    pub up: Vector3<f64>,
}

impl ViewFrame {
    /// `None` for a zero or non-finite direction.
    pub fn looking_along(direction: Vector3<f64>) -> Option<Self> {
        let len = direction.norm();
        if !len.is_finite() || len <= f64::EPSILON {
            return None;
        }
        let d = direction / len;
        let hint = if d.z.abs() > 0.99 {
            Vector3::y()
        } else {
            Vector3::z()
        };
        let right = hint.cross(&d).normalize();
        let up = d.cross(&right);
        Some(Self {
            direction: d,
            right,
            up,
        })
    }

    pub fn project(&self, p: &Point3<f64>) -> Vec2 {
        Vec2::new(self.right.dot(&p.coords), self.up.dot(&p.coords))
    }
}
