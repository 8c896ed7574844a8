use super::{segment_view, PipelineOutput};
use crate::config::PipelineConfig;
use crate::discretize::discretize_view_edge;
use crate::error::GeometryError;
use crate::kernel::CadKernel;
use crate::model::{Diagnostics, NamedView, SegmentViewMetadata, ViewMetadata, ViewSet};
use crate::view::NamedDirection;

pub fn generate<K: CadKernel>(
    kernel: &K,
    shape: &K::Shape,
    cfg: &PipelineConfig,
) -> Result<PipelineOutput, GeometryError> {
    generate_directions(kernel, shape, &cfg.outline_directions, cfg)
}

pub fn generate_directions<K: CadKernel>(
    kernel: &K,
    shape: &K::Shape,
    directions: &[NamedDirection],
    cfg: &PipelineConfig,
) -> Result<PipelineOutput, GeometryError> {
    if directions.is_empty() {
        return Err(GeometryError::empty("no outline directions configured"));
    }

    let mut diagnostics = Diagnostics::default();
    let mut views = Vec::with_capacity(directions.len());
    for dir in directions {
        let metadata = outline_view(kernel, shape, dir, cfg, &mut diagnostics)?;
        views.push(NamedView {
            name: dir.name.clone(),
            metadata: ViewMetadata::Segments(metadata),
        });
    }

    Ok(PipelineOutput {
        views: ViewSet::from_views(views),
        diagnostics,
    })
}

pub(crate) fn outline_view<K: CadKernel>(
    kernel: &K,
    shape: &K::Shape,
    dir: &NamedDirection,
    cfg: &PipelineConfig,
    diag: &mut Diagnostics,
) -> Result<SegmentViewMetadata, GeometryError> {
    let edges = kernel.shape_view(shape, dir.vector())?;
    if edges.is_empty() {
        return Err(GeometryError::empty(format!(
            "outline view '{}' has no edges",
            dir.name
        )));
    }

    let polylines: Vec<_> = edges
        .iter()
        .filter_map(|edge| discretize_view_edge(kernel, edge, cfg.outline_samples, diag))
        .collect();
    if polylines.is_empty() {
        return Err(GeometryError::empty(format!(
            "no edge of outline view '{}' could be discretized",
            dir.name
        )));
    }

    let metadata = segment_view(&polylines, &cfg.normalize);
    diag.segments_emitted += metadata.segments.len();
    tracing::debug!(
        view = %dir.name,
        edges = edges.len(),
        segments = metadata.segments.len(),
        "outline view projected"
    );
    Ok(metadata)
}
