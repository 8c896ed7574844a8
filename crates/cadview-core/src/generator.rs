use crate::config::PipelineConfig;
use crate::error::GeometryError;
use crate::kernel::CadKernel;
use crate::model::{Diagnostics, Mesh};
use crate::pipeline::{
    hidden_line, isometric, orthographic, outline, section, Pipeline, PipelineOutput,
};
use crate::report::{GenerationReport, PipelineReport, Warning};

pub struct PipelineRun {
    pub pipeline: Pipeline,
    pub result: Result<PipelineOutput, GeometryError>,
}

pub struct Generation {
    pub runs: Vec<PipelineRun>,
    pub report: GenerationReport,
}

impl Generation {
    pub fn succeeded(&self) -> impl Iterator<Item = (Pipeline, &PipelineOutput)> {
        self.runs
            .iter()
            .filter_map(|run| run.result.as_ref().ok().map(|out| (run.pipeline, out)))
    }
}

/// Runs a selection of pipelines against one loaded shape.
///
/// The shape is tessellated at most once and the mesh is shared by the
/// mesh-based pipelines. A failing pipeline is reported and does not stop
/// the others.
pub struct Generator {
    cfg: PipelineConfig,
}

impl Generator {
    pub fn new(cfg: PipelineConfig) -> Self {
        Self { cfg }
    }

    pub fn generate<K: CadKernel>(
        &self,
        kernel: &K,
        shape: &K::Shape,
        pipelines: &[Pipeline],
    ) -> Generation {
        let mut selected: Vec<Pipeline> = Vec::with_capacity(pipelines.len());
        for p in pipelines {
            if !selected.contains(p) {
                selected.push(*p);
            }
        }

        let mesh: Option<Result<Mesh, GeometryError>> = selected
            .iter()
            .any(|p| p.needs_mesh())
            .then(|| {
                kernel
                    .tessellate(shape, self.cfg.linear_deflection)
                    .map_err(GeometryError::from)
            });

        let runs: Vec<PipelineRun> = selected
            .into_iter()
            .map(|pipeline| {
                let result = self.run_one(kernel, shape, pipeline, mesh.as_ref());
                match &result {
                    Ok(out) => tracing::info!(%pipeline, views = out.views.len(), "pipeline finished"),
                    Err(err) => tracing::warn!(%pipeline, error = %err, "pipeline failed"),
                }
                PipelineRun { pipeline, result }
            })
            .collect();

        let report = build_report(&runs);
        Generation { runs, report }
    }

    fn run_one<K: CadKernel>(
        &self,
        kernel: &K,
        shape: &K::Shape,
        pipeline: Pipeline,
        mesh: Option<&Result<Mesh, GeometryError>>,
    ) -> Result<PipelineOutput, GeometryError> {
        let cfg = &self.cfg;
        match pipeline {
            Pipeline::Orthographic => orthographic::from_mesh(shared_mesh(mesh)?, cfg),
            Pipeline::IsometricMesh => isometric::from_mesh(shared_mesh(mesh)?, cfg),
            Pipeline::Outline => outline::generate(kernel, shape, cfg),
            Pipeline::HiddenLine => hidden_line::generate(kernel, shape, cfg),
            Pipeline::Section => section::generate(kernel, shape, cfg),
            Pipeline::IsometricOutline => isometric::outline(kernel, shape, cfg),
        }
    }
}

fn shared_mesh(mesh: Option<&Result<Mesh, GeometryError>>) -> Result<&Mesh, GeometryError> {
    match mesh {
        Some(Ok(mesh)) => Ok(mesh),
        Some(Err(err)) => Err(err.clone()),
        None => Err(GeometryError::empty("shape was not tessellated")),
    }
}

fn build_report(runs: &[PipelineRun]) -> GenerationReport {
    let mut diagnostics = Diagnostics::default();
    let mut warnings = Vec::new();
    let mut pipelines = Vec::with_capacity(runs.len());

    for run in runs {
        match &run.result {
            Ok(out) => {
                diagnostics.merge(&out.diagnostics);
                pipelines.push(PipelineReport::succeeded(
                    run.pipeline,
                    &out.views,
                    out.diagnostics,
                ));
            }
            Err(err) => {
                warnings.push(Warning {
                    code: if err.is_empty_geometry() {
                        "empty_geometry".to_string()
                    } else {
                        "pipeline_failed".to_string()
                    },
                    message: format!("{}: {err}", run.pipeline),
                });
                pipelines.push(PipelineReport::failed(run.pipeline, err.to_string()));
            }
        }
    }

    if diagnostics.sampling_fallbacks > 0 {
        warnings.push(Warning {
            code: "sampling_fallback".to_string(),
            message: format!(
                "{} of {} curves could not be sampled and were drawn as straight lines.",
                diagnostics.sampling_fallbacks, diagnostics.edges_sampled
            ),
        });
    }
    if diagnostics.edges_skipped > 0 {
        warnings.push(Warning {
            code: "edges_skipped".to_string(),
            message: format!(
                "{} curves produced fewer than two points and were skipped.",
                diagnostics.edges_skipped
            ),
        });
    }

    GenerationReport {
        pipelines,
        diagnostics,
        warnings,
    }
}
