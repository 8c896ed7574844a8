use crate::geom::ViewBounds;
use crate::model::{Diagnostics, ViewMetadata, ViewSet};
use crate::pipeline::Pipeline;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Warning {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetadataForm {
    Mesh,
    Segments,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewReport {
    pub name: String,
    pub form: MetadataForm,
    pub segments: usize,
    pub vertices: Option<usize>,
    pub bounds: ViewBounds,
}

impl ViewReport {
    pub fn from_metadata(name: &str, metadata: &ViewMetadata) -> Self {
        let (form, vertices) = match metadata {
            ViewMetadata::Mesh(m) => (MetadataForm::Mesh, Some(m.projected_vertices.len())),
            ViewMetadata::Segments(_) => (MetadataForm::Segments, None),
        };
        Self {
            name: name.to_string(),
            form,
            segments: metadata.segment_count(),
            vertices,
            bounds: metadata.bounds(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineReport {
    pub pipeline: Pipeline,
    pub ok: bool,
    pub error: Option<String>,
    pub views: Vec<ViewReport>,
    pub diagnostics: Diagnostics,
}

impl PipelineReport {
    pub fn succeeded(pipeline: Pipeline, views: &ViewSet, diagnostics: Diagnostics) -> Self {
        Self {
            pipeline,
            ok: true,
            error: None,
            views: views
                .iter()
                .map(|v| ViewReport::from_metadata(&v.name, &v.metadata))
                .collect(),
            diagnostics,
        }
    }

    pub fn failed(pipeline: Pipeline, error: String) -> Self {
        Self {
            pipeline,
            ok: false,
            error: Some(error),
            views: Vec::new(),
            diagnostics: Diagnostics::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationReport {
    pub pipelines: Vec<PipelineReport>,
    pub diagnostics: Diagnostics,
    pub warnings: Vec<Warning>,
}
