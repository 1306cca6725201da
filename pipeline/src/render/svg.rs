use std::{fmt::Display, fs, path::PathBuf};

use plotters::prelude::*;

use super::{AxisOpts, PlotKind, SeriesSet, Surface};
use crate::PipelineError;

const PLOT_WIDTH: u32 = 800;
const MARKER_SIZE: i32 = 3;

const SERIES_COLORS: [RGBColor; 4] = [BLUE, RED, GREEN, MAGENTA];

/// Draws each plot into `<out_dir>/<slugified name>.svg`.
pub struct SvgSurface {
    out_dir: PathBuf,
}

impl SvgSurface {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    fn plot_path(&self, name: &str) -> PathBuf {
        let slug: String = name
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() {
                    c.to_ascii_lowercase()
                } else {
                    '-'
                }
            })
            .collect();

        self.out_dir.join(format!("{}.svg", slug.trim_matches('-')))
    }

    fn draw(
        &self,
        kind: PlotKind,
        name: &str,
        data: &SeriesSet,
        opts: &AxisOpts,
    ) -> Result<(), PipelineError> {
        fs::create_dir_all(&self.out_dir).map_err(draw_err)?;
        let path = self.plot_path(name);

        let root = SVGBackend::new(&path, (PLOT_WIDTH, opts.height)).into_drawing_area();
        root.fill(&WHITE).map_err(draw_err)?;

        let (x_range, y_range) = plot_ranges(data);
        let mut chart = ChartBuilder::on(&root)
            .caption(name, ("sans-serif", 20))
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d(x_range, y_range)
            .map_err(draw_err)?;

        chart
            .configure_mesh()
            .x_desc(opts.x_label.as_str())
            .y_desc(opts.y_label.as_str())
            .draw()
            .map_err(draw_err)?;

        for (i, points) in data.values().iter().enumerate() {
            let color = SERIES_COLORS[i % SERIES_COLORS.len()];

            let annotations = match kind {
                PlotKind::Scatter => chart
                    .draw_series(
                        points
                            .iter()
                            .map(|p| Circle::new((p.x, p.y), MARKER_SIZE, color.filled())),
                    )
                    .map_err(draw_err)?,
                PlotKind::Line => chart
                    .draw_series(LineSeries::new(points.iter().map(|p| (p.x, p.y)), &color))
                    .map_err(draw_err)?,
            };

            if let Some(label) = data.label(i) {
                annotations.label(label).legend(move |(x, y)| {
                    Circle::new((x, y), MARKER_SIZE, color.filled())
                });
            }
        }

        if !data.labels().is_empty() {
            chart
                .configure_series_labels()
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .draw()
                .map_err(draw_err)?;
        }

        root.present().map_err(draw_err)
    }
}

impl Surface for SvgSurface {
    fn scatterplot(
        &mut self,
        name: &str,
        data: &SeriesSet,
        opts: &AxisOpts,
    ) -> Result<(), PipelineError> {
        self.draw(PlotKind::Scatter, name, data, opts)
    }

    fn linechart(
        &mut self,
        name: &str,
        data: &SeriesSet,
        opts: &AxisOpts,
    ) -> Result<(), PipelineError> {
        self.draw(PlotKind::Line, name, data, opts)
    }
}

fn draw_err<E: Display>(e: E) -> PipelineError {
    PipelineError::Render(e.to_string())
}

/// Padded axis ranges covering every finite point; a plot with no finite
/// points falls back to the unit square.
fn plot_ranges(data: &SeriesSet) -> (std::ops::Range<f32>, std::ops::Range<f32>) {
    let points = data.values().iter().flatten();

    let mut x_min = f32::INFINITY;
    let mut x_max = f32::NEG_INFINITY;
    let mut y_min = f32::INFINITY;
    let mut y_max = f32::NEG_INFINITY;

    for p in points {
        if p.x.is_finite() {
            x_min = x_min.min(p.x);
            x_max = x_max.max(p.x);
        }
        if p.y.is_finite() {
            y_min = y_min.min(p.y);
            y_max = y_max.max(p.y);
        }
    }

    (pad_range(x_min, x_max), pad_range(y_min, y_max))
}

fn pad_range(min: f32, max: f32) -> std::ops::Range<f32> {
    if !min.is_finite() || !max.is_finite() {
        return 0.0..1.0;
    }

    if min == max {
        return (min - 0.5)..(max + 0.5);
    }

    let pad = (max - min) * 0.05;
    (min - pad)..(max + pad)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predict::Point;
    use std::path::Path;

    #[test]
    fn plot_path_slugifies_the_name() {
        let surface = SvgSurface::new("plots");
        assert_eq!(
            surface.plot_path("Model Predictions vs Original Data"),
            Path::new("plots/model-predictions-vs-original-data.svg")
        );
    }

    #[test]
    fn ranges_cover_all_series_with_padding() {
        let data = SeriesSet::labeled(
            vec![
                vec![Point { x: 0.0, y: 10.0 }],
                vec![Point { x: 10.0, y: 20.0 }],
            ],
            vec!["a", "b"],
        );

        let (x, y) = plot_ranges(&data);
        assert!(x.start < 0.0 && x.end > 10.0);
        assert!(y.start < 10.0 && y.end > 20.0);
    }

    #[test]
    fn non_finite_points_fall_back_to_the_unit_square() {
        let data = SeriesSet::single(vec![Point {
            x: f32::NAN,
            y: f32::NAN,
        }]);

        let (x, y) = plot_ranges(&data);
        assert_eq!(x, 0.0..1.0);
        assert_eq!(y, 0.0..1.0);
    }

    #[test]
    fn degenerate_range_still_has_width() {
        let r = pad_range(2.0, 2.0);
        assert!(r.start < r.end);
    }
}
