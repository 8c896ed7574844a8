//! Projection of CAD shapes into normalized 2D views, plus the snap-point
//! index used for measuring on those views.

pub mod config;
pub mod discretize;
pub mod error;
pub mod generator;
pub mod geom;
pub mod kernel;
pub mod model;
pub mod normalize;
pub mod pipeline;
pub mod projection;
pub mod render;
pub mod report;
pub mod snap;
pub mod view;

pub use config::{PipelineConfig, SnapConfig};
pub use error::{GeometryError, KernelError, RenderError};
pub use generator::{Generation, Generator};
pub use kernel::CadKernel;
pub use model::{Mesh, Segment2D, SnapPoint, ViewMetadata, ViewSet};
pub use pipeline::{Pipeline, PipelineOutput};
pub use snap::SnapIndex;
