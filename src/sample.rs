//! Sample sets as returned by the sampling endpoint, and their bounding box.

use serde::Serialize;

use crate::scale::util::finite_extent;

/// One evaluated point. `y` is `None` where evaluation failed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub x: f64,
    pub y: Option<f64>,
}

impl Sample {
    /// Builds a sample, folding non-finite `y` into the invalid state.
    pub fn new(x: f64, y: f64) -> Self {
        Self::from_option(x, Some(y))
    }

    pub fn invalid(x: f64) -> Self {
        Self { x, y: None }
    }

    pub fn from_option(x: f64, y: Option<f64>) -> Self {
        Self {
            x,
            y: y.filter(|v| v.is_finite()),
        }
    }

    /// The `(x, y)` pair if this sample can be drawn.
    ///
    /// A non-finite `x` has no place on the grid, so it is invalid too.
    pub fn point(&self) -> Option<(f64, f64)> {
        match self.y {
            Some(y) if self.x.is_finite() => Some((self.x, y)),
            _ => None,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.point().is_some()
    }
}

/// An ordered, immutable run of samples.
///
/// Order is preserved as received; re-sorting would move discontinuities.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleSet {
    samples: Vec<Sample>,
}

impl SampleSet {
    pub fn new(samples: Vec<Sample>) -> Self {
        Self { samples }
    }

    /// Zips parallel x/y columns. Callers check the lengths match; extra
    /// entries on either side are dropped.
    pub fn from_columns(xs: &[f64], ys: &[Option<f64>]) -> Self {
        xs.iter()
            .zip(ys)
            .map(|(&x, &y)| Sample::from_option(x, y))
            .collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.samples.iter()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn valid_count(&self) -> usize {
        self.samples.iter().filter(|s| s.is_valid()).count()
    }

    /// Bounding box over the valid samples, see [`validate`].
    pub fn bounds(&self) -> BoundingBox {
        validate(self)
    }
}

impl FromIterator<Sample> for SampleSet {
    fn from_iter<I: IntoIterator<Item = Sample>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a SampleSet {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

/// Function-space extent of a plot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl BoundingBox {
    pub const FALLBACK_MIN_Y: f64 = -1.0;
    pub const FALLBACK_MAX_Y: f64 = 1.0;

    /// The unit y-box used when nothing valid was sampled.
    pub const fn fallback(min_x: f64, max_x: f64) -> Self {
        Self {
            min_x,
            max_x,
            min_y: Self::FALLBACK_MIN_Y,
            max_y: Self::FALLBACK_MAX_Y,
        }
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        self.min_x <= x && x <= self.max_x && self.min_y <= y && y <= self.max_y
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::fallback(-1.0, 1.0)
    }
}

/// Computes the bounding box of a sample set.
///
/// x-range covers every sample with a finite x; y-range covers valid samples
/// only. With no valid y the y-range falls back to `[-1, 1]`, and with no
/// usable x at all the x-range does too. Never fails.
pub fn validate(samples: &SampleSet) -> BoundingBox {
    let fallback = BoundingBox::default();
    validate_in(samples, (fallback.min_x, fallback.max_x))
}

/// Like [`validate`], but falls back to `domain` for the x-range when the set
/// holds no usable x (typically the x-domain that was requested).
pub fn validate_in(samples: &SampleSet, domain: (f64, f64)) -> BoundingBox {
    let (min_x, max_x) = finite_extent(samples.iter().map(|s| s.x)).unwrap_or(domain);
    match finite_extent(samples.iter().filter_map(|s| s.point()).map(|(_, y)| y)) {
        Some((min_y, max_y)) => BoundingBox {
            min_x,
            max_x,
            min_y,
            max_y,
        },
        None => BoundingBox::fallback(min_x, max_x),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(points: &[(f64, Option<f64>)]) -> SampleSet {
        points
            .iter()
            .map(|&(x, y)| Sample::from_option(x, y))
            .collect()
    }

    #[test]
    fn non_finite_y_is_invalid() {
        assert!(!Sample::new(0.0, f64::NAN).is_valid());
        assert!(!Sample::new(0.0, f64::INFINITY).is_valid());
        assert!(!Sample::new(0.0, f64::NEG_INFINITY).is_valid());
        assert!(!Sample::invalid(0.0).is_valid());
        assert!(Sample::new(0.0, -3.5).is_valid());
    }

    #[test]
    fn non_finite_x_is_invalid() {
        assert!(!Sample::new(f64::NAN, 1.0).is_valid());
    }

    #[test]
    fn y_range_ignores_invalid_samples() {
        let samples = set(&[(0.0, Some(2.0)), (1.0, None), (2.0, Some(-1.5)), (3.0, Some(0.5))]);
        let bounds = validate(&samples);

        assert_eq!(
            bounds,
            BoundingBox {
                min_x: 0.0,
                max_x: 3.0,
                min_y: -1.5,
                max_y: 2.0,
            }
        );
    }

    #[test]
    fn x_range_covers_invalid_samples_too() {
        let samples = set(&[(-4.0, None), (0.0, Some(1.0)), (4.0, None)]);
        let bounds = validate(&samples);

        assert_eq!((bounds.min_x, bounds.max_x), (-4.0, 4.0));
        assert_eq!((bounds.min_y, bounds.max_y), (1.0, 1.0));
    }

    #[test]
    fn every_valid_sample_lies_inside_the_box() {
        let samples: SampleSet = (0..50)
            .map(|i| {
                let x = f64::from(i) * 0.3 - 7.0;
                Sample::new(x, 1.0 / x.sin())
            })
            .collect();
        let bounds = validate(&samples);

        for (x, y) in samples.iter().filter_map(Sample::point) {
            assert!(bounds.contains(x, y), "({x}, {y}) outside {bounds:?}");
        }
    }

    #[test]
    fn empty_set_yields_fallback_box() {
        assert_eq!(validate(&SampleSet::default()), BoundingBox::fallback(-1.0, 1.0));
    }

    #[test]
    fn all_invalid_keeps_x_range_and_falls_back_on_y() {
        let samples = set(&[(1.0, None), (2.0, None), (5.0, None)]);
        assert_eq!(validate(&samples), BoundingBox::fallback(1.0, 5.0));
    }

    #[test]
    fn validate_in_uses_requested_domain_for_empty_sets() {
        let bounds = validate_in(&SampleSet::default(), (-10.0, 10.0));
        assert_eq!(bounds, BoundingBox::fallback(-10.0, 10.0));
    }

    #[test]
    fn from_columns_drops_unpaired_entries() {
        let samples = SampleSet::from_columns(&[0.0, 1.0, 2.0], &[Some(1.0), None]);
        assert_eq!(samples.len(), 2);
        assert_eq!(samples.valid_count(), 1);
    }
}
