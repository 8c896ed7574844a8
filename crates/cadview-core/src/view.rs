use crate::geom::Axis;
use crate::projection::ProjectionBasis;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Axis-aligned wireframe views driven from the tessellated mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrthoView {
    Top,
    Bottom,
    Left,
    Right,
}

impl OrthoView {
    pub const ALL: [OrthoView; 4] = [
        OrthoView::Top,
        OrthoView::Bottom,
        OrthoView::Left,
        OrthoView::Right,
    ];

    pub fn name(self) -> &'static str {
        match self {
            OrthoView::Top => "top",
            OrthoView::Bottom => "bottom",
            OrthoView::Left => "left",
            OrthoView::Right => "right",
        }
    }

    pub fn basis(self) -> ProjectionBasis {
        let xy = ProjectionBasis::new(Vector3::x(), Vector3::y());
        let zy = ProjectionBasis::new(Vector3::z(), Vector3::y());
        match self {
            OrthoView::Top => xy,
            OrthoView::Bottom => xy.inverted(false, true),
            OrthoView::Left => zy.inverted(true, false),
            OrthoView::Right => zy,
        }
    }
}

/// Viewing direction and basis shared by the hidden-line and section views.
pub fn axis_view(axis: Axis) -> (Vector3<f64>, ProjectionBasis) {
    match axis {
        Axis::X => (
            Vector3::x(),
            ProjectionBasis::new(Vector3::y(), Vector3::z()),
        ),
        Axis::Y => (
            Vector3::y(),
            ProjectionBasis::new(Vector3::x(), Vector3::z()),
        ),
        Axis::Z => (
            Vector3::z(),
            ProjectionBasis::new(Vector3::x(), Vector3::y()),
        ),
    }
}

/// A named direction handed to the kernel's outline projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedDirection {
    pub name: String,
    pub direction: [f64; 3],
}

impl NamedDirection {
    pub fn new(name: impl Into<String>, direction: [f64; 3]) -> Self {
        Self {
            name: name.into(),
            direction,
        }
    }

    pub fn vector(&self) -> Vector3<f64> {
        Vector3::from(self.direction)
    }
}

pub fn default_outline_directions() -> Vec<NamedDirection> {
    vec![
        NamedDirection::new("top", [0.0, 0.0, 1.0]),
        NamedDirection::new("side", [1.0, 0.0, 0.0]),
        NamedDirection::new("bottom", [0.0, 0.0, -1.0]),
    ]
}

pub const ISOMETRIC_SHAPE2D_VIEW: &str = "isometric_shape2d";
pub const ISOMETRIC_MESH_VIEW: &str = "isometric_matplotlib";

/// Raw (unnormalized) direction passed to the kernel for the outline isometric.
pub fn isometric_direction() -> Vector3<f64> {
    Vector3::new(1.0, 1.0, 1.0)
}

/// Fixed basis for the tessellation isometric: (1,-1,0)/√2 and (1,1,-2)/√6.
pub fn isometric_basis() -> ProjectionBasis {
    ProjectionBasis::new(
        Vector3::new(1.0, -1.0, 0.0) / 2f64.sqrt(),
        Vector3::new(1.0, 1.0, -2.0) / 6f64.sqrt(),
    )
}
