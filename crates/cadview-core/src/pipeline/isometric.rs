//! Two independent isometric routes. They look along the same physical
//! direction but come from different geometry (kernel outline vs. raw
//! tessellation), so their coordinates are not expected to agree.

use super::outline::outline_view;
use super::{mesh_view, PipelineOutput};
use crate::config::PipelineConfig;
use crate::error::GeometryError;
use crate::kernel::CadKernel;
use crate::model::{Diagnostics, Mesh, NamedView, ViewMetadata, ViewSet};
use crate::view::{
    isometric_basis, isometric_direction, NamedDirection, ISOMETRIC_MESH_VIEW,
    ISOMETRIC_SHAPE2D_VIEW,
};

pub fn outline<K: CadKernel>(
    kernel: &K,
    shape: &K::Shape,
    cfg: &PipelineConfig,
) -> Result<PipelineOutput, GeometryError> {
    let d = isometric_direction();
    let dir = NamedDirection::new(ISOMETRIC_SHAPE2D_VIEW, [d.x, d.y, d.z]);

    let mut diagnostics = Diagnostics::default();
    let metadata = outline_view(kernel, shape, &dir, cfg, &mut diagnostics)?;
    Ok(PipelineOutput {
        views: ViewSet::from_views(vec![NamedView {
            name: dir.name,
            metadata: ViewMetadata::Segments(metadata),
        }]),
        diagnostics,
    })
}

pub fn tessellated<K: CadKernel>(
    kernel: &K,
    shape: &K::Shape,
    cfg: &PipelineConfig,
) -> Result<PipelineOutput, GeometryError> {
    let mesh = kernel.tessellate(shape, cfg.linear_deflection)?;
    from_mesh(&mesh, cfg)
}

pub fn from_mesh(mesh: &Mesh, cfg: &PipelineConfig) -> Result<PipelineOutput, GeometryError> {
    mesh.validate()?;
    if mesh.triangles.is_empty() {
        return Err(GeometryError::empty("mesh has no triangles"));
    }

    let metadata = mesh_view(mesh, &isometric_basis(), cfg);
    let diagnostics = Diagnostics {
        segments_emitted: metadata.edges.len(),
        ..Diagnostics::default()
    };
    Ok(PipelineOutput {
        views: ViewSet::from_views(vec![NamedView {
            name: ISOMETRIC_MESH_VIEW.to_string(),
            metadata: ViewMetadata::Mesh(metadata),
        }]),
        diagnostics,
    })
}
