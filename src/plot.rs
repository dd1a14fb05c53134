//! Plot requests and the orchestrator that turns them into polylines.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use log::{debug, warn};

use crate::error::{PlotError, UnknownPreset, ValidationError};
use crate::polyline::Polyline;
use crate::sample::{SampleSet, validate_in};
use crate::service::ComputeService;
use crate::transform::{AxisTransform, Surface};

pub const MIN_SAMPLE_COUNT: usize = 2;
pub const MAX_SAMPLE_COUNT: usize = 2000;
pub const DEFAULT_SAMPLE_COUNT: usize = 400;

/// What to sample: an expression in `x` over `[x_min, x_max]`.
///
/// Built once and never mutated; a new plot means a new request.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotRequest {
    expression: String,
    x_min: f64,
    x_max: f64,
    sample_count: usize,
}

impl PlotRequest {
    pub fn new(expression: impl Into<String>, x_min: f64, x_max: f64, sample_count: usize) -> Self {
        Self {
            expression: expression.into(),
            x_min,
            x_max,
            sample_count,
        }
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn x_min(&self) -> f64 {
        self.x_min
    }

    pub fn x_max(&self) -> f64 {
        self.x_max
    }

    pub fn sample_count(&self) -> usize {
        self.sample_count
    }

    pub fn domain(&self) -> (f64, f64) {
        (self.x_min, self.x_max)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.expression.trim().is_empty() {
            return Err(ValidationError::EmptyExpression);
        }
        if !(self.x_min.is_finite() && self.x_max.is_finite()) {
            return Err(ValidationError::NonFiniteBounds {
                x_min: self.x_min,
                x_max: self.x_max,
            });
        }
        if self.x_min >= self.x_max {
            return Err(ValidationError::InvertedBounds {
                x_min: self.x_min,
                x_max: self.x_max,
            });
        }
        if !(self.x_max - self.x_min).is_finite() {
            return Err(ValidationError::DomainTooWide {
                x_min: self.x_min,
                x_max: self.x_max,
            });
        }
        if !(MIN_SAMPLE_COUNT..=MAX_SAMPLE_COUNT).contains(&self.sample_count) {
            return Err(ValidationError::SampleCountOutOfRange {
                got: self.sample_count,
                min: MIN_SAMPLE_COUNT,
                max: MAX_SAMPLE_COUNT,
            });
        }
        Ok(())
    }
}

/// Ready-made functions with a domain that shows them off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    SineWave,
    Parabola,
    Exponential,
}

impl Preset {
    pub const ALL: [Preset; 3] = [Preset::SineWave, Preset::Parabola, Preset::Exponential];

    pub fn name(&self) -> &'static str {
        match self {
            Self::SineWave => "Sine Wave",
            Self::Parabola => "Parabola",
            Self::Exponential => "Exponential",
        }
    }

    pub fn expression(&self) -> &'static str {
        match self {
            Self::SineWave => "sin(x)",
            Self::Parabola => "x**2",
            Self::Exponential => "exp(x)",
        }
    }

    pub fn domain(&self) -> (f64, f64) {
        match self {
            Self::SineWave => (-2.0 * PI, 2.0 * PI),
            Self::Parabola => (-10.0, 10.0),
            Self::Exponential => (-2.0, 3.0),
        }
    }

    pub fn request(&self, sample_count: usize) -> PlotRequest {
        let (x_min, x_max) = self.domain();
        PlotRequest::new(self.expression(), x_min, x_max, sample_count)
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = UnknownPreset;

    /// Accepts the display name or a short form, case-insensitively
    /// (`"Sine Wave"`, `"sine-wave"`, `"sine"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect::<String>()
            .to_lowercase();
        match key.as_str() {
            "sinewave" | "sine" | "sin" => Ok(Self::SineWave),
            "parabola" => Ok(Self::Parabola),
            "exponential" | "exp" => Ok(Self::Exponential),
            _ => Err(UnknownPreset(s.to_string())),
        }
    }
}

/// The pure half of plotting: bounding box, axis transform, polyline.
///
/// `domain` only matters when `samples` holds no usable x at all.
pub fn plot_samples(samples: &SampleSet, domain: (f64, f64), surface: Surface) -> Polyline {
    let bounds = validate_in(samples, domain);
    let transform = AxisTransform::new(bounds, surface);
    Polyline::build(samples, &transform)
}

/// Validates plot requests, fetches samples and maps them onto a surface.
///
/// Holds no per-request state: the same request against an unchanged service
/// gives the same polyline.
pub struct Plotter<S> {
    service: S,
    surface: Surface,
}

impl<S: ComputeService> Plotter<S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            surface: Surface::default(),
        }
    }

    pub fn with_surface(self, surface: Surface) -> Self {
        Self { surface, ..self }
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Fails fast on a malformed request, before the service is contacted.
    pub fn plot(&self, request: &PlotRequest) -> Result<Polyline, PlotError> {
        request.validate()?;

        debug!(
            "sampling '{}' on [{}, {}] with {} points",
            request.expression(),
            request.x_min(),
            request.x_max(),
            request.sample_count()
        );
        let samples = self.service.sample(request).inspect_err(|err| {
            warn!("sampling '{}' failed: {err}", request.expression());
        })?;

        let polyline = plot_samples(&samples, request.domain(), self.surface);
        debug!(
            "{} of {} samples valid, {} run(s)",
            samples.valid_count(),
            samples.len(),
            polyline.runs().len()
        );
        Ok(polyline)
    }
}
