//! SVG rendering of a polyline.
//!
//! The polyline already lives in surface pixels, so nothing here rescales:
//! axes, tick labels and runs are drawn straight onto the root drawing area.

use plotters::backend::SVGBackend;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::error::RenderError;
use crate::polyline::Polyline;
use crate::scale::{Linear, Scale};
use crate::transform::{AxisTransform, ScreenPoint, Surface};

const AXIS_COLOR: RGBColor = RGBColor(229, 231, 235);
const CURVE_COLOR: RGBColor = RGBColor(37, 99, 235);
const LABEL_COLOR: RGBColor = RGBColor(107, 114, 128);
const CURVE_WIDTH: u32 = 2;
const LABEL_SIZE: u32 = 12;
const TICK_LENGTH: i32 = 4;

fn px(value: f64) -> i32 {
    value.round() as i32
}

fn to_err<E: std::error::Error + Send + Sync>(err: DrawingAreaErrorKind<E>) -> RenderError {
    RenderError(err.to_string())
}

fn pixel(point: &ScreenPoint) -> (i32, i32) {
    (px(point.x), px(point.y))
}

const MAX_LABEL_DECIMALS: f64 = 12.0;
const SCIENTIFIC_ABOVE: f64 = 1e9;

/// Decimals needed to tell ticks `step` apart.
pub fn tick_decimals(step: f64) -> usize {
    if !(step.is_finite() && step > 0.0) {
        return 0;
    }
    (-step.log10().floor()).clamp(0.0, MAX_LABEL_DECIMALS) as usize
}

/// Tick label with at most `decimals` decimals, no trailing zeros, no `-0`.
pub fn format_tick(value: f64, decimals: usize) -> String {
    if value.abs() >= SCIENTIFIC_ABOVE {
        return format!("{value:e}");
    }
    let text = format!("{value:.decimals$}");
    let text = if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text.as_str()
    };
    match text {
        "-0" | "" => "0".to_string(),
        other => other.to_string(),
    }
}

/// Major tick values of `scale` with labels precise enough to differ.
fn labelled_ticks(scale: &Linear<f64>) -> Vec<(f64, String)> {
    let values: Vec<f64> = scale.tick_iter().majors().collect();
    let step = match values.as_slice() {
        [only] => only.abs(),
        _ => values
            .windows(2)
            .map(|pair| (pair[1] - pair[0]).abs())
            .fold(0.0, f64::max),
    };
    let decimals = tick_decimals(step);
    values
        .into_iter()
        .map(|value| (value, format_tick(value, decimals)))
        .collect()
}

/// Draws `polyline` on a `surface`-sized SVG document.
///
/// Each run is its own stroke; a run of one vertex is drawn as a dot so an
/// isolated valid sample stays visible. Axes are drawn even when there is
/// nothing to plot.
pub fn render_svg(polyline: &Polyline, surface: &Surface) -> Result<String, RenderError> {
    let transform = AxisTransform::new(*polyline.bounds(), *surface);
    let (left, bottom) = (px(surface.padding), px(surface.bottom()));
    let (top, right) = (px(surface.padding), px(surface.right()));

    let mut document = String::new();
    {
        let size = (surface.width.round() as u32, surface.height.round() as u32);
        let root = SVGBackend::with_string(&mut document, size).into_drawing_area();
        root.fill(&WHITE).map_err(to_err)?;

        root.draw(&PathElement::new(vec![(left, bottom), (right, bottom)], &AXIS_COLOR))
            .map_err(to_err)?;
        root.draw(&PathElement::new(vec![(left, top), (left, bottom)], &AXIS_COLOR))
            .map_err(to_err)?;

        let font = ("sans-serif", LABEL_SIZE).into_font().color(&LABEL_COLOR);
        for (value, label) in labelled_ticks(transform.x_scale()) {
            let x = px(transform.x_to_screen(value));
            root.draw(&PathElement::new(vec![(x, bottom), (x, bottom + TICK_LENGTH)], &AXIS_COLOR))
                .map_err(to_err)?;
            root.draw(&Text::new(
                label,
                (x, bottom + TICK_LENGTH + 2),
                font.pos(Pos::new(HPos::Center, VPos::Top)),
            ))
            .map_err(to_err)?;
        }
        for (value, label) in labelled_ticks(transform.y_scale()) {
            let y = px(transform.y_to_screen(value));
            root.draw(&PathElement::new(vec![(left - TICK_LENGTH, y), (left, y)], &AXIS_COLOR))
                .map_err(to_err)?;
            root.draw(&Text::new(
                label,
                (left - TICK_LENGTH - 2, y),
                font.pos(Pos::new(HPos::Right, VPos::Center)),
            ))
            .map_err(to_err)?;
        }

        for run in polyline.runs() {
            match run.as_slice() {
                [only] => root
                    .draw(&Circle::new(pixel(only), CURVE_WIDTH, CURVE_COLOR.filled()))
                    .map_err(to_err)?,
                vertices => root
                    .draw(&PathElement::new(
                        vertices.iter().map(pixel).collect::<Vec<_>>(),
                        CURVE_COLOR.stroke_width(CURVE_WIDTH),
                    ))
                    .map_err(to_err)?,
            }
        }

        if !polyline.is_empty() {
            root.draw(&Text::new("x", (right - 10, bottom - 5), font.clone()))
                .map_err(to_err)?;
            root.draw(&Text::new("y", (left + 5, top + 10), font.clone()))
                .map_err(to_err)?;
        }

        root.present().map_err(to_err)?;
    }
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plot::plot_samples;
    use crate::sample::SampleSet;

    #[test]
    fn tick_labels_are_trimmed() {
        assert_eq!(format_tick(2.0, 0), "2");
        assert_eq!(format_tick(100.0, 0), "100");
        assert_eq!(format_tick(-0.5, 1), "-0.5");
        assert_eq!(format_tick(1.25, 2), "1.25");
        assert_eq!(format_tick(-0.0001, 2), "0");
        assert_eq!(format_tick(1.1e308, 0), "1.1e308");
    }

    #[test]
    fn decimals_follow_the_step() {
        assert_eq!(tick_decimals(2.0), 0);
        assert_eq!(tick_decimals(20.0), 0);
        assert_eq!(tick_decimals(0.5), 1);
        assert_eq!(tick_decimals(0.0005), 4);
        assert_eq!(tick_decimals(0.0), 0);
        assert_eq!(tick_decimals(f64::INFINITY), 0);
    }

    #[test]
    fn narrow_range_labels_stay_distinct() {
        let labels: Vec<String> = labelled_ticks(&Linear::new(0.0, 0.004))
            .into_iter()
            .map(|(_, label)| label)
            .collect();

        assert!(labels.len() > 1);
        assert!(labels.contains(&"0.001".to_string()), "{labels:?}");
        for pair in labels.windows(2) {
            assert_ne!(pair[0], pair[1]);
        }
    }

    #[test]
    fn huge_range_renders_without_stray_vertices() {
        let samples = SampleSet::from_columns(
            &[-710.0, 0.0, 710.0],
            &[Some(-1.1e308), Some(0.0), Some(1.1e308)],
        );
        let polyline = plot_samples(&samples, (-710.0, 710.0), Surface::default());
        let svg = render_svg(&polyline, &Surface::default()).unwrap();

        assert!(polyline.vertices().all(|p| p.x.is_finite() && p.y.is_finite()));
        assert!(!svg.contains("NaN"));
    }

    #[test]
    fn renders_one_path_per_multi_vertex_run() {
        let samples = SampleSet::from_columns(
            &[0.0, 1.0, 2.0, 3.0, 4.0, 5.0],
            &[Some(0.0), Some(1.0), None, Some(2.0), Some(3.0), None],
        );
        let polyline = plot_samples(&samples, (0.0, 5.0), Surface::default());
        let svg = render_svg(&polyline, &Surface::default()).unwrap();

        assert!(svg.contains("<svg"));
        assert!(svg.contains("width=\"800\""));
        assert!(svg.contains("height=\"400\""));
        // Two curve strokes plus two axes and the tick marks.
        assert!(svg.matches("<polyline").count() >= 4);
    }

    #[test]
    fn empty_plot_still_renders_axes() {
        let polyline = plot_samples(&SampleSet::default(), (-1.0, 1.0), Surface::default());
        let svg = render_svg(&polyline, &Surface::default()).unwrap();

        assert!(svg.contains("<polyline"));
        assert!(!svg.contains("<circle"));
    }
}
