use crate::error::KernelError;
use crate::geom::Vec2;
use crate::kernel::CadKernel;
use crate::model::Diagnostics;
use nalgebra::Point3;

/// Samples a 3D kernel edge into a polyline.
///
/// A failed sampling call is replaced by the edge's two endpoints. Returns
/// `None` when the kernel hands back fewer than two points.
pub fn discretize_edge<K: CadKernel>(
    kernel: &K,
    edge: &K::Edge,
    target_points: usize,
    diag: &mut Diagnostics,
) -> Option<Vec<Point3<f64>>> {
    with_fallback(
        kernel.sample_edge(edge, target_points),
        || {
            let (a, b) = kernel.edge_endpoints(edge);
            vec![a, b]
        },
        diag,
    )
}

/// Samples an outline edge that already lives in the view plane.
pub fn discretize_view_edge<K: CadKernel>(
    kernel: &K,
    edge: &K::ViewEdge,
    samples: usize,
    diag: &mut Diagnostics,
) -> Option<Vec<Vec2>> {
    with_fallback(
        kernel.sample_view_edge(edge, samples),
        || {
            let (a, b) = kernel.view_edge_endpoints(edge);
            vec![a, b]
        },
        diag,
    )
}

fn with_fallback<P>(
    sampled: Result<Vec<P>, KernelError>,
    endpoints: impl FnOnce() -> Vec<P>,
    diag: &mut Diagnostics,
) -> Option<Vec<P>> {
    diag.edges_sampled += 1;
    let points = match sampled {
        Ok(points) => points,
        Err(err) => {
            diag.sampling_fallbacks += 1;
            tracing::debug!(error = %err, "curve sampling failed, using endpoints");
            endpoints()
        }
    };
    if points.len() < 2 {
        diag.edges_skipped += 1;
        return None;
    }
    Some(points)
}
