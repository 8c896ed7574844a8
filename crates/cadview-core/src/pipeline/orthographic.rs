use super::{mesh_view, PipelineOutput};
use crate::config::PipelineConfig;
use crate::error::GeometryError;
use crate::kernel::CadKernel;
use crate::model::{Diagnostics, Mesh, NamedView, ViewMetadata, ViewSet};
use crate::view::OrthoView;

pub fn generate<K: CadKernel>(
    kernel: &K,
    shape: &K::Shape,
    cfg: &PipelineConfig,
) -> Result<PipelineOutput, GeometryError> {
    let mesh = kernel.tessellate(shape, cfg.linear_deflection)?;
    from_mesh(&mesh, cfg)
}

/// Wireframes of the top, bottom, left and right views of `mesh`.
pub fn from_mesh(mesh: &Mesh, cfg: &PipelineConfig) -> Result<PipelineOutput, GeometryError> {
    mesh.validate()?;
    if mesh.triangles.is_empty() {
        return Err(GeometryError::empty("mesh has no triangles"));
    }

    let mut diagnostics = Diagnostics::default();
    let views = OrthoView::ALL
        .iter()
        .map(|view| {
            let metadata = mesh_view(mesh, &view.basis(), cfg);
            diagnostics.segments_emitted += metadata.edges.len();
            NamedView {
                name: view.name().to_string(),
                metadata: ViewMetadata::Mesh(metadata),
            }
        })
        .collect();

    tracing::info!(
        vertices = mesh.vertices.len(),
        triangles = mesh.triangles.len(),
        "orthographic views projected"
    );

    Ok(PipelineOutput {
        views: ViewSet::from_views(views),
        diagnostics,
    })
}
