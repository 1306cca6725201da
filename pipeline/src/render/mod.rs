mod svg;

pub use svg::SvgSurface;

use crate::{predict::Point, PipelineError};

/// Point series to draw on one plot. Labels are optional as a set: either
/// every series is named or none is.
#[derive(Debug, Clone)]
pub struct SeriesSet {
    values: Vec<Vec<Point>>,
    series: Vec<String>,
}

impl SeriesSet {
    /// One unnamed series.
    pub fn single(values: Vec<Point>) -> Self {
        Self {
            values: vec![values],
            series: Vec::new(),
        }
    }

    /// Named series, one label per value set.
    ///
    /// # Panics
    /// Panics when the label count does not match the series count.
    pub fn labeled<S: Into<String>>(values: Vec<Vec<Point>>, series: Vec<S>) -> Self {
        assert_eq!(values.len(), series.len(), "every series needs a label");
        Self {
            values,
            series: series.into_iter().map(Into::into).collect(),
        }
    }

    pub fn values(&self) -> &[Vec<Point>] {
        &self.values
    }

    pub fn label(&self, index: usize) -> Option<&str> {
        self.series.get(index).map(String::as_str)
    }

    pub fn labels(&self) -> &[String] {
        &self.series
    }
}

/// Axis labels and plot height, the only presentation options a caller
/// controls.
#[derive(Debug, Clone)]
pub struct AxisOpts {
    pub x_label: String,
    pub y_label: String,
    pub height: u32,
}

impl AxisOpts {
    pub fn new(x_label: impl Into<String>, y_label: impl Into<String>, height: u32) -> Self {
        Self {
            x_label: x_label.into(),
            y_label: y_label.into(),
            height,
        }
    }
}

/// Where plots end up. Purely side-effecting; the pipeline never reads
/// anything back from a surface.
pub trait Surface {
    fn scatterplot(&mut self, name: &str, data: &SeriesSet, opts: &AxisOpts)
        -> Result<(), PipelineError>;

    fn linechart(&mut self, name: &str, data: &SeriesSet, opts: &AxisOpts)
        -> Result<(), PipelineError>;
}

/// The plot kinds a surface can receive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlotKind {
    Scatter,
    Line,
}

/// One captured surface call.
#[derive(Debug, Clone)]
pub struct RecordedPlot {
    pub kind: PlotKind,
    pub name: String,
    pub data: SeriesSet,
    pub opts: AxisOpts,
}

/// A surface that keeps every call instead of drawing, for asserting on
/// what a run would have rendered.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub plots: Vec<RecordedPlot>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Surface for RecordingSurface {
    fn scatterplot(
        &mut self,
        name: &str,
        data: &SeriesSet,
        opts: &AxisOpts,
    ) -> Result<(), PipelineError> {
        self.plots.push(RecordedPlot {
            kind: PlotKind::Scatter,
            name: name.to_string(),
            data: data.clone(),
            opts: opts.clone(),
        });
        Ok(())
    }

    fn linechart(
        &mut self,
        name: &str,
        data: &SeriesSet,
        opts: &AxisOpts,
    ) -> Result<(), PipelineError> {
        self.plots.push(RecordedPlot {
            kind: PlotKind::Line,
            name: name.to_string(),
            data: data.clone(),
            opts: opts.clone(),
        });
        Ok(())
    }
}
