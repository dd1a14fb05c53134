//! Calculus plotting client
//!
//! `calcplot` talks to a calculus computation service (derivatives,
//! integrals, function sampling, reading material) and turns sampled
//! functions into drawable geometry.
//!
//! # Pipeline
//!
//! Plotting runs in four stages, each usable on its own:
//!
//! 1. [`validate`] computes the [`BoundingBox`] of a [`SampleSet`] over the
//!    samples whose `y` is a finite number. Undefined points (asymptotes,
//!    domain errors) are data, not errors.
//! 2. [`AxisTransform`] maps function space onto a padded [`Surface`], with
//!    y flipped so larger values sit higher on screen.
//! 3. [`Polyline::build`] walks the samples once and emits disjoint runs of
//!    pixel vertices, breaking at every undefined sample so no line is drawn
//!    across a gap.
//! 4. [`Plotter`] validates a [`PlotRequest`], fetches samples through a
//!    [`ComputeService`] and runs the three stages above.
//!
//! # Examples
//!
//! ## The pure pipeline
//!
//! ```rust
//! use calcplot::{AxisTransform, Polyline, Sample, SampleSet, ScreenPoint, Surface, validate};
//!
//! // 1/x around zero: the pole is reported as undefined.
//! let samples: SampleSet = vec![
//!     Sample::new(-2.0, -0.5),
//!     Sample::new(-1.0, -1.0),
//!     Sample::invalid(0.0),
//!     Sample::new(1.0, 1.0),
//!     Sample::new(2.0, 0.5),
//! ]
//! .into_iter()
//! .collect();
//!
//! let transform = AxisTransform::new(validate(&samples), Surface::default());
//! let polyline = Polyline::build(&samples, &transform);
//!
//! // Two separate strokes, one on each side of the pole.
//! assert_eq!(polyline.runs().len(), 2);
//! assert_eq!(polyline.runs()[0][0], ScreenPoint::new(40.0, 280.0));
//! ```
//!
//! ## Against a service
//!
//! ```no_run
//! use calcplot::{Config, HttpService, PlotRequest, Plotter};
//!
//! let config = Config::default().with_env();
//! let plotter = Plotter::new(HttpService::from_config(&config)).with_surface(config.surface);
//!
//! let polyline = plotter.plot(&PlotRequest::new("tan(x)", -3.0, 3.0, 600))?;
//! println!("{} runs", polyline.runs().len());
//! # Ok::<(), calcplot::PlotError>(())
//! ```
//!
//! ## Ticks
//!
//! ```rust
//! use calcplot::{Scale, scale::Linear};
//!
//! let scale = Linear::new(-10.0, 10.0);
//! let labels: Vec<f64> = scale.major_ticks().iter().map(|t| t.value).collect();
//! assert_eq!(labels, vec![-10.0, -8.0, -6.0, -4.0, -2.0, 0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
//! ```

pub mod calc;
pub mod config;
pub mod error;
pub mod materials;
pub mod plot;
pub mod polyline;
pub mod render;
pub mod sample;
pub mod scale;
pub mod service;
pub mod session;
pub mod transform;

pub use calc::{CalcRequest, CalcResult, Operation};
pub use config::Config;
pub use error::{PlotError, ServiceError, ValidationError};
pub use plot::{PlotRequest, Plotter, Preset};
pub use polyline::{Polyline, Run};
pub use sample::{BoundingBox, Sample, SampleSet, validate};
pub use scale::{Scale, Tick, TickIter};
pub use service::{ComputeService, HttpService};
pub use session::{PlotSession, Ticket};
pub use transform::{AxisTransform, PlotPoint, ScreenPoint, Surface};
