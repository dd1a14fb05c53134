//! Error taxonomy.
//!
//! Request-shape violations and transport failures are errors; invalid
//! sample data and degenerate domains are not.

use std::path::PathBuf;

/// A malformed [`PlotRequest`](crate::PlotRequest). Not worth retrying.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("expression must not be empty")]
    EmptyExpression,
    #[error("x bounds must be finite numbers (got {x_min} and {x_max})")]
    NonFiniteBounds { x_min: f64, x_max: f64 },
    #[error("x min ({x_min}) must be less than x max ({x_max})")]
    InvertedBounds { x_min: f64, x_max: f64 },
    #[error("x range [{x_min}, {x_max}] is too wide to plot")]
    DomainTooWide { x_min: f64, x_max: f64 },
    #[error("points must be between {min} and {max} (got {got})")]
    SampleCountOutOfRange { got: usize, min: usize, max: usize },
    #[error("derivative order must be at least 1")]
    ZeroOrder,
    #[error("integral bounds must be finite numbers")]
    NonFiniteIntegralBounds,
}

/// The computation service could not produce a usable answer.
///
/// The caller may retry. `Display` is the message meant for the user: the
/// service's own `detail` when it sent one.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ServiceError {
    #[error("{0}")]
    Transport(String),
    #[error("{message}")]
    Status { status: u16, message: String },
    #[error("malformed response from computation service: {0}")]
    Malformed(String),
}

impl ServiceError {
    /// HTTP status, when the service answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Anything [`Plotter::plot`](crate::Plotter::plot) can fail with.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum PlotError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Service(#[from] ServiceError),
}

impl PlotError {
    /// Service failures may succeed on retry; validation failures will not.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Service(_))
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown preset '{0}' (expected sine, parabola or exponential)")]
pub struct UnknownPreset(pub String);

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("backend url must not be empty")]
    EmptyBackendUrl,
    #[error("surface {width}x{height} with padding {padding} leaves no room to draw")]
    InvalidSurface { width: f64, height: f64, padding: f64 },
}

#[derive(thiserror::Error, Debug)]
#[error("failed to render plot: {0}")]
pub struct RenderError(pub String);
