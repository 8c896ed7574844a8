use super::{project_edges, segment_view, PipelineOutput};
use crate::config::PipelineConfig;
use crate::error::GeometryError;
use crate::geom::{Aabb3, Axis, Plane};
use crate::kernel::CadKernel;
use crate::model::{Diagnostics, NamedView, ViewMetadata, ViewSet};
use crate::view::axis_view;

/// Cuts through the middle of the bounding box, one plane per axis.
pub fn generate<K: CadKernel>(
    kernel: &K,
    shape: &K::Shape,
    cfg: &PipelineConfig,
) -> Result<PipelineOutput, GeometryError> {
    let bbox = kernel
        .bounding_box(shape)?
        .filter(Aabb3::is_valid)
        .ok_or_else(|| GeometryError::empty("shape has an empty bounding box"))?;

    let mut diagnostics = Diagnostics::default();
    let mut views = Vec::with_capacity(Axis::ALL.len());

    for axis in Axis::ALL {
        let plane = mid_plane(&bbox, axis);
        let edges = kernel.section(shape, &plane)?;
        if edges.is_empty() {
            return Err(GeometryError::empty(format!(
                "section plane {}={} does not intersect the shape",
                axis.name(),
                plane.origin[axis.index()]
            )));
        }

        let (_, basis) = axis_view(axis);
        let polylines = project_edges(kernel, &edges, &basis, cfg.curve_samples, &mut diagnostics);
        let metadata = segment_view(&polylines, &cfg.normalize);
        if metadata.segments.is_empty() {
            return Err(GeometryError::empty(format!(
                "no segments to render for section '{}'",
                axis.name()
            )));
        }
        diagnostics.segments_emitted += metadata.segments.len();

        views.push(NamedView {
            name: axis.name().to_string(),
            metadata: ViewMetadata::Segments(metadata),
        });
    }

    Ok(PipelineOutput {
        views: ViewSet::from_views(views),
        diagnostics,
    })
}

pub fn mid_plane(bbox: &Aabb3, axis: Axis) -> Plane {
    Plane::new(bbox.center(), axis.unit())
}
