use crate::config::SnapConfig;
use crate::geom::{Vec2, ViewBounds};
use crate::model::{SnapKind, SnapPoint, ViewMetadata};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Candidate measurement points of one view.
#[derive(Debug, Clone)]
pub struct SnapIndex {
    points: Vec<SnapPoint>,
    bounds: ViewBounds,
}

impl SnapIndex {
    pub fn build(metadata: &ViewMetadata) -> Self {
        let bounds = metadata.bounds();
        let snap = |normalized_xy: Vec2, kind| SnapPoint {
            normalized_xy,
            world_xy: bounds.to_world(normalized_xy),
            kind,
        };

        let mut points = Vec::new();
        match metadata {
            ViewMetadata::Mesh(m) => {
                points.extend(
                    m.projected_vertices
                        .iter()
                        .map(|p| snap(*p, SnapKind::Vertex)),
                );
                let mut seen = HashSet::new();
                for &[i, j] in &m.edges {
                    if !seen.insert((i.min(j), i.max(j))) {
                        continue;
                    }
                    let (Some(a), Some(b)) = (
                        m.projected_vertices.get(i as usize),
                        m.projected_vertices.get(j as usize),
                    ) else {
                        continue;
                    };
                    points.push(snap(a.midpoint(b), SnapKind::Midpoint));
                }
            }
            ViewMetadata::Segments(s) => {
                for seg in &s.segments {
                    points.push(SnapPoint {
                        normalized_xy: seg.start,
                        world_xy: seg.world_start,
                        kind: SnapKind::Vertex,
                    });
                    points.push(SnapPoint {
                        normalized_xy: seg.end,
                        world_xy: seg.world_end,
                        kind: SnapKind::Vertex,
                    });
                    points.push(SnapPoint {
                        normalized_xy: seg.start.midpoint(&seg.end),
                        world_xy: seg.world_start.midpoint(&seg.world_end),
                        kind: SnapKind::Midpoint,
                    });
                }
            }
        }

        Self { points, bounds }
    }

    pub fn points(&self) -> &[SnapPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Closest snap point within `threshold`; the earliest built wins ties.
    pub fn nearest(&self, query: Vec2, threshold: f64) -> Option<&SnapPoint> {
        let mut best: Option<(f64, &SnapPoint)> = None;
        for p in &self.points {
            let d = p.normalized_xy.distance(&query);
            match best {
                Some((best_d, _)) if d >= best_d => {}
                _ => best = Some((d, p)),
            }
        }
        best.filter(|(d, _)| *d <= threshold).map(|(_, p)| p)
    }

    /// Snaps `query` if possible, otherwise keeps it as a free point.
    pub fn resolve(&self, query: Vec2, cfg: &SnapConfig) -> MeasurePoint {
        match self.nearest(query, cfg.threshold) {
            Some(p) => MeasurePoint {
                normalized_xy: p.normalized_xy,
                world_xy: p.world_xy,
                snapped: Some(p.kind),
            },
            None => MeasurePoint {
                normalized_xy: query,
                world_xy: self.bounds.to_world(query),
                snapped: None,
            },
        }
    }

    pub fn measure(&self, from: Vec2, to: Vec2, cfg: &SnapConfig) -> Measurement {
        Measurement::between(self.resolve(from, cfg), self.resolve(to, cfg))
    }
}

/// An endpoint of a measurement, snapped or free-floating.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeasurePoint {
    pub normalized_xy: Vec2,
    pub world_xy: Vec2,
    pub snapped: Option<SnapKind>,
}

/// A linear dimension between two points, in projected model units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub from: MeasurePoint,
    pub to: MeasurePoint,
    pub distance: f64,
    pub dx: f64,
    pub dy: f64,
}

impl Measurement {
    pub fn between(from: MeasurePoint, to: MeasurePoint) -> Self {
        let dx = to.world_xy.x - from.world_xy.x;
        let dy = to.world_xy.y - from.world_xy.y;
        Self {
            from,
            to,
            distance: from.world_xy.distance(&to.world_xy),
            dx,
            dy,
        }
    }
}
