use crate::geom::{Vec2, ViewBounds};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizeConfig {
    /// Extents at or below this are treated as collapsed.
    pub epsilon: f64,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self { epsilon: 1e-12 }
    }
}

/// Maps `points` into the unit square, returning the original-space bounds.
///
/// Each axis is scaled independently. An empty input yields unit bounds. An
/// axis whose extent collapses (a single point, or all points sharing the
/// coordinate) gets a unit-wide interval centred on that coordinate, so it
/// normalizes to 0.5 and can still be inverted with [`denormalize`].
pub fn normalize(points: &[Vec2], cfg: &NormalizeConfig) -> (Vec<Vec2>, ViewBounds) {
    let mut bounds = ViewBounds::empty();
    for p in points {
        bounds.include_point(*p);
    }
    if bounds.is_empty() {
        return (Vec::new(), ViewBounds::UNIT);
    }

    if bounds.max_x - bounds.min_x <= cfg.epsilon {
        let c = (bounds.min_x + bounds.max_x) * 0.5;
        bounds.min_x = c - 0.5;
        bounds.max_x = c + 0.5;
    }
    if bounds.max_y - bounds.min_y <= cfg.epsilon {
        let c = (bounds.min_y + bounds.max_y) * 0.5;
        bounds.min_y = c - 0.5;
        bounds.max_y = c + 0.5;
    }

    let normalized = points
        .iter()
        .map(|p| normalize_point(*p, &bounds, cfg))
        .collect();
    (normalized, bounds)
}

pub fn normalize_point(p: Vec2, bounds: &ViewBounds, cfg: &NormalizeConfig) -> Vec2 {
    bounds.to_normalized(p, cfg.epsilon)
}

pub fn denormalize(p: Vec2, bounds: &ViewBounds) -> Vec2 {
    bounds.to_world(p)
}
