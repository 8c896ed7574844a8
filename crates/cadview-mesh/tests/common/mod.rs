#![allow(dead_code)]

use cadview_core::model::Mesh;
use nalgebra::Point3;

pub const CUBE_VERTICES: [[f64; 3]; 8] = [
    [0.0, 0.0, 0.0],
    [1.0, 0.0, 0.0],
    [1.0, 1.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, 0.0, 1.0],
    [1.0, 0.0, 1.0],
    [1.0, 1.0, 1.0],
    [0.0, 1.0, 1.0],
];

/// Outward-facing triangles of the unit cube, two per face.
#[rustfmt::skip]
pub const CUBE_TRIANGLES: [[u32; 3]; 12] = [
    [0, 2, 1], [0, 3, 2], // bottom
    [4, 5, 6], [4, 6, 7], // top
    [0, 1, 5], [0, 5, 4], // front
    [2, 3, 7], [2, 7, 6], // back
    [0, 4, 7], [0, 7, 3], // left
    [1, 2, 6], [1, 6, 5], // right
];

pub fn cube_mesh() -> Mesh {
    Mesh::new(
        CUBE_VERTICES.iter().map(|v| Point3::from(*v)).collect(),
        CUBE_TRIANGLES.to_vec(),
    )
}

fn cube_facets() -> impl Iterator<Item = [[f64; 3]; 3]> {
    CUBE_TRIANGLES
        .iter()
        .map(|t| t.map(|i| CUBE_VERTICES[i as usize]))
}

pub fn cube_ascii_stl() -> String {
    let mut out = String::from("solid cube\n");
    for facet in cube_facets() {
        out.push_str("  facet normal 0 0 0\n    outer loop\n");
        for [x, y, z] in facet {
            out.push_str(&format!("      vertex {x:e} {y} {z}\n"));
        }
        out.push_str("    endloop\n  endfacet\n");
    }
    out.push_str("endsolid cube\n");
    out
}

pub fn cube_binary_stl(header: &[u8]) -> Vec<u8> {
    let mut out = vec![0u8; 80];
    out[..header.len()].copy_from_slice(header);
    out.extend_from_slice(&(CUBE_TRIANGLES.len() as u32).to_le_bytes());
    for facet in cube_facets() {
        out.extend_from_slice(&[0u8; 12]);
        for v in facet {
            for c in v {
                out.extend_from_slice(&(c as f32).to_le_bytes());
            }
        }
        out.extend_from_slice(&[0u8; 2]);
    }
    out
}
