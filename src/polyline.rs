//! Turns an ordered sample set into drawable vertex runs.

use serde::Serialize;

use crate::sample::{BoundingBox, SampleSet};
use crate::transform::{AxisTransform, ScreenPoint};

/// A maximal stretch of consecutive valid samples, in surface pixels.
pub type Run = Vec<ScreenPoint>;

/// Disjoint vertex runs plus the bounding box they were mapped from.
///
/// Each run is stroked as its own open path, so an invalid sample shows up
/// as a visible break rather than a chord across the gap.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Polyline {
    runs: Vec<Run>,
    bounds: BoundingBox,
}

impl Polyline {
    /// Maps `samples` through `transform` in a single ordered pass.
    ///
    /// An invalid sample closes the open run; the next valid sample opens a
    /// new one. Runs are never empty and come out in encounter order.
    pub fn build(samples: &SampleSet, transform: &AxisTransform) -> Self {
        let mut runs = Vec::new();
        let mut open: Run = Vec::new();

        for sample in samples {
            match sample.point() {
                Some((x, y)) => open.push(ScreenPoint::new(
                    transform.x_to_screen(x),
                    transform.y_to_screen(y),
                )),
                None if !open.is_empty() => runs.push(std::mem::take(&mut open)),
                None => {}
            }
        }
        if !open.is_empty() {
            runs.push(open);
        }

        Self {
            runs,
            bounds: *transform.bounds(),
        }
    }

    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    pub fn bounds(&self) -> &BoundingBox {
        &self.bounds
    }

    /// No run at all: nothing valid was sampled. Axes still render.
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    pub fn vertex_count(&self) -> usize {
        self.runs.iter().map(Vec::len).sum()
    }

    /// Vertices of every run flattened in order.
    pub fn vertices(&self) -> impl Iterator<Item = &ScreenPoint> {
        self.runs.iter().flatten()
    }
}
