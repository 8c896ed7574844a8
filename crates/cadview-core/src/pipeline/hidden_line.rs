use super::{project_edges, segment_view, PipelineOutput};
use crate::config::PipelineConfig;
use crate::error::GeometryError;
use crate::geom::Axis;
use crate::kernel::CadKernel;
use crate::model::{Diagnostics, NamedView, ViewMetadata, ViewSet};
use crate::view::axis_view;

/// Visible-edge silhouettes seen along +X, +Y and +Z.
pub fn generate<K: CadKernel>(
    kernel: &K,
    shape: &K::Shape,
    cfg: &PipelineConfig,
) -> Result<PipelineOutput, GeometryError> {
    let mut diagnostics = Diagnostics::default();
    let mut views = Vec::with_capacity(Axis::ALL.len());

    for axis in Axis::ALL {
        let (direction, basis) = axis_view(axis);
        let edges = kernel.visible_edges(shape, direction)?;
        if edges.is_empty() {
            return Err(GeometryError::empty(format!(
                "HLR produced no visible edges for view '{}'",
                axis.name()
            )));
        }

        let polylines = project_edges(kernel, &edges, &basis, cfg.curve_samples, &mut diagnostics);
        let metadata = segment_view(&polylines, &cfg.normalize);
        if metadata.segments.is_empty() {
            return Err(GeometryError::empty(format!(
                "no segments to render for view '{}'",
                axis.name()
            )));
        }
        diagnostics.segments_emitted += metadata.segments.len();

        tracing::debug!(
            view = axis.name(),
            edges = edges.len(),
            segments = metadata.segments.len(),
            "hidden-line view projected"
        );
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
