use thiserror::Error;

/// Failure reported by a [`crate::kernel::CadKernel`] operation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{operation} failed: {message}")]
pub struct KernelError {
    pub operation: &'static str,
    pub message: String,
}

impl KernelError {
    pub fn new(operation: &'static str, message: impl Into<String>) -> Self {
        Self {
            operation,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GeometryError {
    #[error("empty geometry: {0}")]
    EmptyGeometry(String),

    #[error("invalid mesh: {0}")]
    InvalidMesh(String),

    #[error("kernel {operation} failed: {message}")]
    Kernel {
        operation: &'static str,
        message: String,
    },
}

impl GeometryError {
    pub fn empty(reason: impl Into<String>) -> Self {
        GeometryError::EmptyGeometry(reason.into())
    }

    pub fn is_empty_geometry(&self) -> bool {
        matches!(self, GeometryError::EmptyGeometry(_))
    }
}

impl From<KernelError> for GeometryError {
    fn from(err: KernelError) -> Self {
        GeometryError::Kernel {
            operation: err.operation,
            message: err.message,
        }
    }
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("no geometry to render")]
    NoGeometry,

    #[error("invalid render style: {0}")]
    InvalidStyle(String),

    #[error("format error while rendering")]
    Format(#[from] std::fmt::Error),
}
