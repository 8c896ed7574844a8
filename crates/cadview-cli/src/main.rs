use anyhow::{bail, Context, Result};
use cadview_core::geom::Vec2;
use cadview_core::render::{Rasterizer, RenderStyle, SvgRasterizer};
use cadview_core::{Generator, Pipeline, PipelineConfig, SnapConfig, SnapIndex, ViewMetadata};
use cadview_mesh::{MeshKernel, MeshKernelConfig};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "cadview")]
#[command(about = "Project CAD meshes into normalized 2D views and measure on them.")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate view metadata (and SVG images) for a mesh.
    Views {
        input: PathBuf,
        /// Pipelines to run; repeat the flag. Defaults to all of them.
        #[arg(long = "pipeline", short = 'p')]
        pipelines: Vec<Pipeline>,
        #[arg(long, default_value = "views")]
        out: PathBuf,
        /// JSON file with `pipeline`, `kernel` and `render` sections.
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long)]
        report: Option<PathBuf>,
        #[arg(long)]
        no_images: bool,
        #[arg(long)]
        linear_deflection: Option<f64>,
        #[arg(long)]
        dedup_edges: bool,
    },
    /// Resolve a click (normalized coordinates) to a snap point.
    Snap {
        metadata: PathBuf,
        #[arg(long)]
        x: f64,
        #[arg(long)]
        y: f64,
        #[arg(long, default_value_t = SnapConfig::default().threshold)]
        threshold: f64,
    },
    /// Measure between two clicks (normalized `x,y` pairs).
    Measure {
        metadata: PathBuf,
        #[arg(long, value_parser = parse_xy)]
        from: Vec2,
        #[arg(long, value_parser = parse_xy)]
        to: Vec2,
        #[arg(long, default_value_t = SnapConfig::default().threshold)]
        threshold: f64,
    },
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileConfig {
    pipeline: PipelineConfig,
    kernel: MeshKernelConfig,
    render: RenderStyle,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Views {
            input,
            pipelines,
            out,
            config,
            report,
            no_images,
            linear_deflection,
            dedup_edges,
        } => {
            let mut cfg = match config {
                Some(path) => load_config(&path)?,
                None => FileConfig::default(),
            };
            if let Some(d) = linear_deflection {
                cfg.pipeline.linear_deflection = d;
            }
            if dedup_edges {
                cfg.pipeline.dedup_triangle_edges = true;
            }
            let pipelines = if pipelines.is_empty() {
                Pipeline::ALL.to_vec()
            } else {
                pipelines
            };
            views(&input, &pipelines, &out, &cfg, report.as_deref(), !no_images)
        }
        Command::Snap {
            metadata,
            x,
            y,
            threshold,
        } => {
            let index = SnapIndex::build(&load_metadata(&metadata)?);
            tracing::debug!(candidates = index.len(), "snap index built");
            let point = index.resolve(Vec2::new(x, y), &SnapConfig { threshold });
            println!("{}", serde_json::to_string_pretty(&point).context("serialize point")?);
            Ok(())
        }
        Command::Measure {
            metadata,
            from,
            to,
            threshold,
        } => {
            let index = SnapIndex::build(&load_metadata(&metadata)?);
            let measurement = index.measure(from, to, &SnapConfig { threshold });
            println!(
                "{}",
                serde_json::to_string_pretty(&measurement).context("serialize measurement")?
            );
            Ok(())
        }
    }
}

fn views(
    input: &Path,
    pipelines: &[Pipeline],
    out: &Path,
    cfg: &FileConfig,
    report: Option<&Path>,
    images: bool,
) -> Result<()> {
    ensure_input_file(input)?;

    let ext = input
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    let kernel = MeshKernel::new(cfg.kernel.clone());
    let shape = match ext.as_str() {
        "stl" => kernel
            .load_stl(input)
            .with_context(|| format!("load mesh: {input:?}"))?,
        "step" | "stp" => bail!("STEP input needs a B-rep kernel; export the part as STL first."),
        _ => bail!("Unsupported input extension: .{ext}"),
    };

    let generation = Generator::new(cfg.pipeline.clone()).generate(&kernel, &shape, pipelines);

    // Everything is serialized and rendered before the first write, so a
    // failure leaves no partial view set on disk.
    let mut files: Vec<(PathBuf, String)> = Vec::new();
    for (pipeline, output) in generation.succeeded() {
        let dir = out.join(pipeline.name());
        for view in output.views.iter() {
            let json =
                serde_json::to_string_pretty(&view.metadata).context("serialize view metadata")?;
            files.push((dir.join(format!("{}.json", view.name)), json));

            if images {
                let svg = SvgRasterizer
                    .rasterize(&view.metadata.segments_2d(), &cfg.render)
                    .with_context(|| format!("render view {}/{}", pipeline, view.name))?;
                files.push((dir.join(format!("{}.svg", view.name)), svg));
            }
        }
    }

    for (path, contents) in &files {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).with_context(|| format!("create output dir: {dir:?}"))?;
        }
        std::fs::write(path, contents).with_context(|| format!("write output: {path:?}"))?;
    }
    tracing::info!(out = %out.display(), files = files.len(), "views written");

    let json = serde_json::to_string_pretty(&generation.report).context("serialize report")?;
    if let Some(path) = report {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).ok();
        }
        std::fs::write(path, &json).with_context(|| format!("write report: {path:?}"))?;
    } else {
        println!("{json}");
    }

    if generation.succeeded().next().is_none() {
        bail!("no pipeline produced any views");
    }
    Ok(())
}

fn load_config(path: &Path) -> Result<FileConfig> {
    let text = std::fs::read_to_string(path).with_context(|| format!("read config: {path:?}"))?;
    serde_json::from_str(&text).with_context(|| format!("parse config: {path:?}"))
}

fn load_metadata(path: &Path) -> Result<ViewMetadata> {
    let text = std::fs::read_to_string(path).with_context(|| format!("read metadata: {path:?}"))?;
    serde_json::from_str(&text).with_context(|| format!("parse metadata: {path:?}"))
}

fn parse_xy(s: &str) -> Result<Vec2, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected `x,y`, got `{s}`"))?;
    let x: f64 = x.trim().parse().map_err(|e| format!("bad x in `{s}`: {e}"))?;
    let y: f64 = y.trim().parse().map_err(|e| format!("bad y in `{s}`: {e}"))?;
    Ok(Vec2::new(x, y))
}

fn ensure_input_file(input: &Path) -> Result<()> {
    match std::fs::metadata(input) {
        Ok(meta) => {
            if meta.is_file() {
                Ok(())
            } else {
                bail!("input is not a file: {input:?}");
            }
        }
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
            bail!("input not found: {input:?} (cwd: {cwd:?}).");
        }
        Err(err) => Err(err).with_context(|| format!("stat input: {input:?}")),
    }
}
