use cadview_core::error::GeometryError;
use cadview_core::geom::Aabb3;
use cadview_core::model::Mesh;
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EdgeKind {
    /// Dihedral angle between the two faces exceeds the sharp threshold.
    Sharp,
    /// Only one adjacent face.
    Boundary,
    /// Shared by more than two faces.
    NonManifold,
    /// Two nearly coplanar faces.
    Smooth,
}

#[derive(Debug, Clone)]
pub struct MeshEdge {
    pub v0: u32,
    pub v1: u32,
    pub faces: Vec<usize>,
    pub kind: EdgeKind,
}

/// A triangle mesh with the adjacency needed to find drawing edges.
#[derive(Debug, Clone)]
pub struct MeshShape {
    mesh: Mesh,
    face_normals: Vec<Vector3<f64>>,
    edges: Vec<MeshEdge>,
}

impl MeshShape {
    /// `sharp_angle_deg` is the dihedral angle above which an edge is drawn.
    pub fn new(mesh: Mesh, sharp_angle_deg: f64) -> Result<Self, GeometryError> {
        mesh.validate()?;
        let face_normals: Vec<Vector3<f64>> = mesh
            .triangles
            .iter()
            .map(|tri| face_normal(&mesh, tri))
            .collect();

        let mut index: HashMap<(u32, u32), usize> = HashMap::new();
        let mut edges: Vec<MeshEdge> = Vec::new();
        for (f, &[a, b, c]) in mesh.triangles.iter().enumerate() {
            for (u, v) in [(a, b), (b, c), (c, a)] {
                let key = (u.min(v), u.max(v));
                let slot = *index.entry(key).or_insert_with(|| {
                    edges.push(MeshEdge {
                        v0: key.0,
                        v1: key.1,
                        faces: Vec::with_capacity(2),
                        kind: EdgeKind::Smooth,
                    });
                    edges.len() - 1
                });
                edges[slot].faces.push(f);
            }
        }

        let cos_sharp = sharp_angle_deg.to_radians().cos();
        for edge in &mut edges {
            edge.kind = match edge.faces.as_slice() {
                [_] => EdgeKind::Boundary,
                [f0, f1] => {
                    let n0 = face_normals[*f0];
                    let n1 = face_normals[*f1];
                    if n0 == Vector3::zeros() || n1 == Vector3::zeros() {
                        EdgeKind::Smooth
                    } else if n0.dot(&n1) < cos_sharp {
                        EdgeKind::Sharp
                    } else {
                        EdgeKind::Smooth
                    }
                }
                _ => EdgeKind::NonManifold,
            };
        }

        Ok(Self {
            mesh,
            face_normals,
            edges,
        })
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn edges(&self) -> &[MeshEdge] {
        &self.edges
    }

    pub fn vertex(&self, i: u32) -> Point3<f64> {
        self.mesh.vertices[i as usize]
    }

    pub fn triangle(&self, face: usize) -> [Point3<f64>; 3] {
        let [a, b, c] = self.mesh.triangles[face];
        [self.vertex(a), self.vertex(b), self.vertex(c)]
    }

    pub fn bounding_box(&self) -> Option<Aabb3> {
        Aabb3::from_points(&self.mesh.vertices)
    }

    /// Whether `edge` separates a face turned toward `direction` from one
    /// turned away from it.
    pub fn is_silhouette(&self, edge: &MeshEdge, direction: &Vector3<f64>) -> bool {
        match edge.faces.as_slice() {
            [f0, f1] => {
                let d0 = self.face_normals[*f0].dot(direction);
                let d1 = self.face_normals[*f1].dot(direction);
                (d0 > 0.0 && d1 < 0.0) || (d0 < 0.0 && d1 > 0.0)
            }
            _ => false,
        }
    }

    /// Edges a drawing of the shape seen along `direction` would show.
    pub fn drawing_edges<'a>(
        &'a self,
        direction: &'a Vector3<f64>,
    ) -> impl Iterator<Item = &'a MeshEdge> + 'a {
        self.edges.iter().filter(move |e| match e.kind {
            EdgeKind::Sharp | EdgeKind::Boundary | EdgeKind::NonManifold => true,
            EdgeKind::Smooth => self.is_silhouette(e, direction),
        })
    }
}

fn face_normal(mesh: &Mesh, tri: &[u32; 3]) -> Vector3<f64> {
    let a = mesh.vertices[tri[0] as usize];
    let b = mesh.vertices[tri[1] as usize];
    let c = mesh.vertices[tri[2] as usize];
    let n = (b - a).cross(&(c - a));
    let len = n.norm();
    if len > f64::EPSILON {
        n / len
    } else {
        Vector3::zeros()
    }
}
