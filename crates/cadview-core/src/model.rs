use crate::error::GeometryError;
use crate::geom::{Vec2, ViewBounds};
use nalgebra::Point3;
use serde::{Deserialize, Serialize};

/// Indexed triangle mesh produced by kernel tessellation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Mesh {
    pub vertices: Vec<Point3<f64>>,
    pub triangles: Vec<[u32; 3]>,
}

impl Mesh {
    pub fn new(vertices: Vec<Point3<f64>>, triangles: Vec<[u32; 3]>) -> Self {
        Self {
            vertices,
            triangles,
        }
    }

    pub fn validate(&self) -> Result<(), GeometryError> {
        let n = self.vertices.len();
        for (t, tri) in self.triangles.iter().enumerate() {
            if let Some(bad) = tri.iter().find(|&&i| i as usize >= n) {
                return Err(GeometryError::InvalidMesh(format!(
                    "triangle {t} references vertex {bad} but the mesh has {n} vertices"
                )));
            }
        }
        Ok(())
    }

    /// The three directed edges of every triangle, in triangle order.
    pub fn triangle_edges(&self) -> impl Iterator<Item = [u32; 2]> + '_ {
        self.triangles
            .iter()
            .flat_map(|&[a, b, c]| [[a, b], [b, c], [c, a]])
    }
}

/// A line segment in normalized view space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment2D {
    pub p0: Vec2,
    pub p1: Vec2,
}

impl Segment2D {
    pub fn new(p0: Vec2, p1: Vec2) -> Self {
        Self { p0, p1 }
    }
}

/// A normalized segment that also carries its projected (world) endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewSegment {
    pub start: Vec2,
    pub end: Vec2,
    pub world_start: Vec2,
    pub world_end: Vec2,
}

impl ViewSegment {
    pub fn normalized(&self) -> Segment2D {
        Segment2D::new(self.start, self.end)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshViewMetadata {
    pub projected_vertices: Vec<Vec2>,
    pub edges: Vec<[u32; 2]>,
    pub bounds: ViewBounds,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentViewMetadata {
    pub segments: Vec<ViewSegment>,
    pub bounds: ViewBounds,
}

/// Persisted description of one projected view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ViewMetadata {
    Mesh(MeshViewMetadata),
    Segments(SegmentViewMetadata),
}

impl ViewMetadata {
    pub fn bounds(&self) -> ViewBounds {
        match self {
            ViewMetadata::Mesh(m) => m.bounds,
            ViewMetadata::Segments(s) => s.bounds,
        }
    }

    pub fn segment_count(&self) -> usize {
        match self {
            ViewMetadata::Mesh(m) => m.edges.len(),
            ViewMetadata::Segments(s) => s.segments.len(),
        }
    }

    /// Normalized segments ready for a rasterizer.
    pub fn segments_2d(&self) -> Vec<Segment2D> {
        match self {
            ViewMetadata::Mesh(m) => m
                .edges
                .iter()
                .filter_map(|&[i, j]| {
                    let a = m.projected_vertices.get(i as usize)?;
                    let b = m.projected_vertices.get(j as usize)?;
                    Some(Segment2D::new(*a, *b))
                })
                .collect(),
            ViewMetadata::Segments(s) => s.segments.iter().map(ViewSegment::normalized).collect(),
        }
    }

    /// Checks index validity and that every coordinate lies in [0,1] ± `tolerance`.
    pub fn check_invariants(&self, tolerance: f64) -> Result<(), GeometryError> {
        let in_unit = |p: &Vec2| {
            let lo = -tolerance;
            let hi = 1.0 + tolerance;
            p.is_finite() && p.x >= lo && p.x <= hi && p.y >= lo && p.y <= hi
        };
        match self {
            ViewMetadata::Mesh(m) => {
                let n = m.projected_vertices.len();
                if let Some(e) = m.edges.iter().find(|e| e.iter().any(|&i| i as usize >= n)) {
                    return Err(GeometryError::InvalidMesh(format!(
                        "edge {e:?} out of range for {n} projected vertices"
                    )));
                }
                if let Some(p) = m.projected_vertices.iter().find(|p| !in_unit(p)) {
                    return Err(GeometryError::InvalidMesh(format!(
                        "projected vertex {p:?} outside the unit square"
                    )));
                }
            }
            ViewMetadata::Segments(s) => {
                if let Some(seg) = s
                    .segments
                    .iter()
                    .find(|seg| !in_unit(&seg.start) || !in_unit(&seg.end))
                {
                    return Err(GeometryError::InvalidMesh(format!(
                        "segment {seg:?} outside the unit square"
                    )));
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedView {
    pub name: String,
    pub metadata: ViewMetadata,
}

/// Views produced by one pipeline invocation, in view-table order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ViewSet {
    views: Vec<NamedView>,
}

impl ViewSet {
    pub fn from_views(views: Vec<NamedView>) -> Self {
        Self { views }
    }

    pub fn get(&self, name: &str) -> Option<&ViewMetadata> {
        self.views
            .iter()
            .find(|v| v.name == name)
            .map(|v| &v.metadata)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.views.iter().map(|v| v.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &NamedView> {
        self.views.iter()
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }
}

impl IntoIterator for ViewSet {
    type Item = NamedView;
    type IntoIter = std::vec::IntoIter<NamedView>;

    fn into_iter(self) -> Self::IntoIter {
        self.views.into_iter()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SnapKind {
    Vertex,
    Midpoint,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SnapPoint {
    pub normalized_xy: Vec2,
    pub world_xy: Vec2,
    pub kind: SnapKind,
}

/// Counters collected while discretizing kernel curves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Diagnostics {
    pub edges_sampled: usize,
    pub sampling_fallbacks: usize,
    pub edges_skipped: usize,
    pub segments_emitted: usize,
}

impl Diagnostics {
    pub fn merge(&mut self, other: &Diagnostics) {
        self.edges_sampled += other.edges_sampled;
        self.sampling_fallbacks += other.sampling_fallbacks;
        self.edges_skipped += other.edges_skipped;
        self.segments_emitted += other.segments_emitted;
    }
}
