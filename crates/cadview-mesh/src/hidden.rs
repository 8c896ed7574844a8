//! Ray-cast hidden-line classification.
//!
//! Each drawing edge is cut into equal spans. A span is visible when a ray
//! from its midpoint toward the viewer escapes every triangle. Consecutive
//! visible spans are merged back into one edge.

use crate::frame::ViewFrame;
use crate::shape::MeshShape;
use crate::LineEdge;
use nalgebra::{Point3, Vector3};
use std::collections::HashMap;

const BARY_TOLERANCE: f64 = 1e-9;

/// Triangles binned by their footprint in the view plane.
pub(crate) struct OcclusionGrid<'a> {
    shape: &'a MeshShape,
    frame: ViewFrame,
    cell: f64,
    cells: HashMap<(i64, i64), Vec<usize>>,
    ray_offset: f64,
}

impl<'a> OcclusionGrid<'a> {
    pub(crate) fn new(shape: &'a MeshShape, frame: ViewFrame) -> Self {
        let tri_count = shape.mesh().triangles.len().max(1);
        let diag = shape.bounding_box().map(|b| b.diagonal()).unwrap_or(1.0);
        let cell = (diag / (tri_count as f64).sqrt()).max(1e-9);

        let mut cells: HashMap<(i64, i64), Vec<usize>> = HashMap::new();
        for face in 0..shape.mesh().triangles.len() {
            let pts = shape.triangle(face).map(|p| frame.project(&p));
            let min_x = pts.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
            let max_x = pts.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max);
            let min_y = pts.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
            let max_y = pts.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);
            let (gx0, gy0) = cell_of(min_x, min_y, cell);
            let (gx1, gy1) = cell_of(max_x, max_y, cell);
            for gx in gx0..=gx1 {
                for gy in gy0..=gy1 {
                    cells.entry((gx, gy)).or_default().push(face);
                }
            }
        }

        Self {
            shape,
            frame,
            cell,
            cells,
            ray_offset: (diag * 1e-9).max(1e-12),
        }
    }

    pub(crate) fn is_visible(&self, p: &Point3<f64>) -> bool {
        let q = self.frame.project(p);
        let Some(candidates) = self.cells.get(&cell_of(q.x, q.y, self.cell)) else {
            return true;
        };
        let origin = p + self.frame.direction * self.ray_offset;
        !candidates.iter().any(|&face| {
            let [a, b, c] = self.shape.triangle(face);
            ray_hits_triangle(&origin, &self.frame.direction, &a, &b, &c, self.ray_offset)
        })
    }

    /// Visible sub-edges of `start..end`, using `spans` equal pieces.
    pub(crate) fn visible_runs(
        &self,
        start: Point3<f64>,
        end: Point3<f64>,
        spans: usize,
    ) -> Vec<LineEdge> {
        let spans = spans.max(1);
        let at = |t: f64| start + (end - start) * t;

        let mut runs = Vec::new();
        let mut run_start: Option<usize> = None;
        for i in 0..spans {
            let mid = at((i as f64 + 0.5) / spans as f64);
            match (self.is_visible(&mid), run_start) {
                (true, None) => run_start = Some(i),
                (false, Some(s)) => {
                    runs.push(LineEdge::new(at(s as f64 / spans as f64), at(i as f64 / spans as f64)));
                    run_start = None;
                }
                _ => {}
            }
        }
        if let Some(s) = run_start {
            runs.push(LineEdge::new(at(s as f64 / spans as f64), end));
        }
        runs
    }
}

fn cell_of(x: f64, y: f64, cell: f64) -> (i64, i64) {
    ((x / cell).floor() as i64, (y / cell).floor() as i64)
}

/// Möller–Trumbore, counting hits on triangle borders and only beyond `t_min`.
fn ray_hits_triangle(
    origin: &Point3<f64>,
    dir: &Vector3<f64>,
    a: &Point3<f64>,
    b: &Point3<f64>,
    c: &Point3<f64>,
    t_min: f64,
) -> bool {
    let e1 = b - a;
    let e2 = c - a;
    let pvec = dir.cross(&e2);
    let det = e1.dot(&pvec);
    if det.abs() < 1e-12 {
        return false;
    }
    let inv = 1.0 / det;
    let tvec = origin - a;
    let u = tvec.dot(&pvec) * inv;
    if u < -BARY_TOLERANCE || u > 1.0 + BARY_TOLERANCE {
        return false;
    }
    let qvec = tvec.cross(&e1);
    let v = dir.dot(&qvec) * inv;
    if v < -BARY_TOLERANCE || u + v > 1.0 + BARY_TOLERANCE {
        return false;
    }
    e2.dot(&qvec) * inv > t_min
}
