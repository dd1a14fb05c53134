//! Coordinate transformations between function space and the drawing surface.
//!
//! # Coordinate Systems
//!
//! ## Surface Coordinates
//!
//! - Origin (0, 0) is at the top-left of the surface
//! - X increases to the right
//! - Y increases downward
//! - A fixed padding is kept clear on every side for axes and labels
//!
//! ## Function Coordinates
//!
//! - X increases to the right
//! - Y increases upward (note the difference!)
//!
//! [`AxisTransform`] owns the y inversion, so callers never flip by hand.
//!
//! # Examples
//!
//! ```rust
//! use calcplot::{AxisTransform, BoundingBox, PlotPoint, Surface};
//!
//! let bounds = BoundingBox { min_x: 0.0, max_x: 2.0, min_y: 0.0, max_y: 4.0 };
//! let transform = AxisTransform::new(bounds, Surface::default());
//!
//! // Bottom-left of the data lands on the bottom-left of the padded area.
//! let origin = transform.to_screen(&PlotPoint::new(0.0, 0.0));
//! assert_eq!((origin.x, origin.y), (40.0, 360.0));
//!
//! // Top-right of the data lands on the top-right of the padded area.
//! let corner = transform.to_screen(&PlotPoint::new(2.0, 4.0));
//! assert_eq!((corner.x, corner.y), (760.0, 40.0));
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::sample::BoundingBox;
use crate::scale::{Linear, Scale};

/// Size of the drawing surface in pixels.
///
/// `padding` is reserved on all four sides; the curve is mapped into the
/// remaining `(width - 2*padding) x (height - 2*padding)` area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Surface {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
}

impl Surface {
    pub const DEFAULT_WIDTH: f64 = 800.0;
    pub const DEFAULT_HEIGHT: f64 = 400.0;
    pub const DEFAULT_PADDING: f64 = 40.0;

    pub const fn new(width: f64, height: f64, padding: f64) -> Self {
        Self {
            width,
            height,
            padding,
        }
    }

    /// Width of the padded plotting area.
    pub fn inner_width(&self) -> f64 {
        self.width - 2.0 * self.padding
    }

    /// Height of the padded plotting area.
    pub fn inner_height(&self) -> f64 {
        self.height - 2.0 * self.padding
    }

    /// Pixel row of the bottom edge of the plotting area.
    pub fn bottom(&self) -> f64 {
        self.height - self.padding
    }

    /// Pixel column of the right edge of the plotting area.
    pub fn right(&self) -> f64 {
        self.width - self.padding
    }

    /// Rejects surfaces that leave no room to draw in.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let finite = self.width.is_finite() && self.height.is_finite() && self.padding.is_finite();
        if !finite || self.padding < 0.0 || self.inner_width() <= 0.0 || self.inner_height() <= 0.0
        {
            return Err(ConfigError::InvalidSurface {
                width: self.width,
                height: self.height,
                padding: self.padding,
            });
        }
        Ok(())
    }
}

impl Default for Surface {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_WIDTH,
            Self::DEFAULT_HEIGHT,
            Self::DEFAULT_PADDING,
        )
    }
}

/// A point in surface/pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A point in function coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlotPoint {
    pub x: f64,
    pub y: f64,
}

impl PlotPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Two independent affine maps, function space to surface pixels.
///
/// ```text
/// fx(x) = padding + norm_x(x) * (width - 2*padding)
/// fy(y) = height - padding - norm_y(y) * (height - 2*padding)
/// ```
///
/// where `norm_*` are [`Linear`] scales over the bounding box. A degenerate
/// axis (equal bounds) normalizes to `0.5`, putting every point on the
/// mid-line of that axis.
///
/// The transform is `Copy` and never allocates; identical inputs give
/// bit-identical outputs.
///
/// # Examples
///
/// ```rust
/// use calcplot::{AxisTransform, BoundingBox, Surface};
///
/// // A constant function: min_y == max_y.
/// let bounds = BoundingBox { min_x: -1.0, max_x: 1.0, min_y: 3.0, max_y: 3.0 };
/// let transform = AxisTransform::new(bounds, Surface::new(800.0, 400.0, 40.0));
///
/// assert_eq!(transform.y_to_screen(3.0), 200.0);
/// assert_eq!(transform.x_to_screen(0.0), 400.0);
///
/// // Inverse mapping, e.g. for hover read-outs.
/// assert_eq!(transform.x_from_screen(400.0), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisTransform {
    bounds: BoundingBox,
    surface: Surface,
    x_scale: Linear<f64>,
    y_scale: Linear<f64>,
}

impl AxisTransform {
    pub fn new(bounds: BoundingBox, surface: Surface) -> Self {
        Self {
            bounds,
            surface,
            x_scale: Linear::new(bounds.min_x, bounds.max_x),
            y_scale: Linear::new(bounds.min_y, bounds.max_y),
        }
    }

    pub const fn bounds(&self) -> &BoundingBox {
        &self.bounds
    }

    pub const fn surface(&self) -> &Surface {
        &self.surface
    }

    pub const fn x_scale(&self) -> &Linear<f64> {
        &self.x_scale
    }

    pub const fn y_scale(&self) -> &Linear<f64> {
        &self.y_scale
    }

    pub fn x_to_screen(&self, x: f64) -> f64 {
        self.surface.padding + self.x_scale.normalize(&x) * self.surface.inner_width()
    }

    /// Includes the y inversion.
    pub fn y_to_screen(&self, y: f64) -> f64 {
        self.surface.bottom() - self.y_scale.normalize(&y) * self.surface.inner_height()
    }

    pub fn to_screen(&self, point: &PlotPoint) -> ScreenPoint {
        ScreenPoint::new(self.x_to_screen(point.x), self.y_to_screen(point.y))
    }

    pub fn x_from_screen(&self, screen_x: f64) -> f64 {
        let t = (screen_x - self.surface.padding) / self.surface.inner_width();
        self.x_scale.denormalize(t)
    }

    /// Includes the y inversion.
    pub fn y_from_screen(&self, screen_y: f64) -> f64 {
        let t = (self.surface.bottom() - screen_y) / self.surface.inner_height();
        self.y_scale.denormalize(t)
    }

    pub fn from_screen(&self, point: &ScreenPoint) -> PlotPoint {
        PlotPoint::new(self.x_from_screen(point.x), self.y_from_screen(point.y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transform(min_x: f64, max_x: f64, min_y: f64, max_y: f64) -> AxisTransform {
        AxisTransform::new(
            BoundingBox {
                min_x,
                max_x,
                min_y,
                max_y,
            },
            Surface::default(),
        )
    }

    #[test]
    fn matches_the_closed_form() {
        let t = transform(-3.0, 5.0, -2.0, 7.0);
        let (w, h, p) = (800.0, 400.0, 40.0);

        for (x, y) in [(-3.0, -2.0), (0.3, 1.1), (5.0, 7.0), (2.2, -0.4)] {
            let fx = p + (x - -3.0) / (5.0 - -3.0) * (w - 2.0 * p);
            let fy = h - p - (y - -2.0) / (7.0 - -2.0) * (h - 2.0 * p);
            assert_eq!(t.x_to_screen(x), fx);
            assert_eq!(t.y_to_screen(y), fy);
        }
    }

    #[test]
    fn larger_y_is_higher_on_screen() {
        let t = transform(0.0, 1.0, 0.0, 10.0);
        assert!(t.y_to_screen(8.0) < t.y_to_screen(2.0));
    }

    #[test]
    fn degenerate_axes_collapse_to_the_mid_line() {
        let t = transform(4.0, 4.0, -1.5, -1.5);

        assert_eq!(t.x_to_screen(4.0), 400.0);
        assert_eq!(t.y_to_screen(-1.5), 200.0);
    }

    #[test]
    fn screen_round_trip() {
        let t = transform(-6.283, 6.283, -1.0, 1.0);
        let plot = PlotPoint::new(1.25, -0.5);
        let back = t.from_screen(&t.to_screen(&plot));

        assert!((back.x - plot.x).abs() < 1e-9);
        assert!((back.y - plot.y).abs() < 1e-9);
    }

    #[test]
    fn surface_validation() {
        assert!(Surface::default().validate().is_ok());
        assert!(Surface::new(80.0, 400.0, 40.0).validate().is_err());
        assert!(Surface::new(800.0, 400.0, -1.0).validate().is_err());
        assert!(Surface::new(f64::NAN, 400.0, 40.0).validate().is_err());
    }
}
