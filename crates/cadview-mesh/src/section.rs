//! Plane/mesh intersection.

use crate::shape::MeshShape;
use crate::LineEdge;
use cadview_core::geom::Plane;
use nalgebra::Point3;

/// Cut segments of every triangle crossing `plane`.
///
/// Triangles lying in the plane contribute nothing; their boundary is
/// picked up from the neighbouring triangles that cross it.
pub fn intersect_shape_with_plane(shape: &MeshShape, plane: &Plane, tolerance: f64) -> Vec<LineEdge> {
    let mut segments = Vec::new();
    for face in 0..shape.mesh().triangles.len() {
        let [a, b, c] = shape.triangle(face);
        let pts = intersect_triangle(a, b, c, plane, tolerance);
        if let [p, q] = pts.as_slice() {
            if (q - p).norm() > tolerance {
                segments.push(LineEdge::new(*p, *q));
            }
        }
    }
    segments
}

fn intersect_triangle(
    v0: Point3<f64>,
    v1: Point3<f64>,
    v2: Point3<f64>,
    plane: &Plane,
    tol: f64,
) -> Vec<Point3<f64>> {
    let verts = [v0, v1, v2];
    let d = verts.map(|v| plane.signed_distance(&v));

    // Coplanar triangle.
    if d.iter().all(|x| x.abs() < tol) {
        return Vec::new();
    }

    let mut points: Vec<Point3<f64>> = Vec::with_capacity(3);
    let mut push_unique = |p: Point3<f64>| {
        if !points.iter().any(|q| (q - p).norm() < tol) {
            points.push(p);
        }
    };

    for i in 0..3 {
        if d[i].abs() < tol {
            push_unique(verts[i]);
        }
    }
    for (i, j) in [(0, 1), (1, 2), (2, 0)] {
        let crosses = (d[i] > tol && d[j] < -tol) || (d[i] < -tol && d[j] > tol);
        if crosses {
            let t = d[i] / (d[i] - d[j]);
            push_unique(verts[i] + (verts[j] - verts[i]) * t);
        }
    }

    points.truncate(2);
    points
}
