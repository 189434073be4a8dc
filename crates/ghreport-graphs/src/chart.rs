//! Chart options for one series.

pub use ghreport_common::ChartType;
use ghreport_common::Metric;
use ghreport_config::ChartStyleConfig;
use serde::{Deserialize, Serialize};

/// Field holding the parsed timestamp of each record.
pub const DATE_ACCESSOR: &str = "date";

/// Rendering options for a single chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartSpec {
    /// Caption drawn above the plot.
    pub title: String,
    /// Marker style.
    pub chart_type: ChartType,
    /// Whether to overlay a least-squares regression line.
    pub least_squares: bool,
    /// Whether the chart spans the page width.
    pub full_width: bool,
    /// Height in pixels.
    pub height: u32,
    /// Colors for the series; the first is used for the markers.
    pub color_range: Vec<String>,
    /// Field used for the x axis.
    pub x_accessor: String,
    /// Field used for the y axis.
    pub y_accessor: String,
    /// Selector of the page region the chart is drawn into.
    pub target: String,
}

impl ChartSpec {
    /// The chart the report draws for `metric`.
    pub fn for_metric(metric: Metric, style: &ChartStyleConfig) -> Self {
        Self {
            title: metric.title().to_string(),
            chart_type: style.chart_type,
            least_squares: style.least_squares,
            full_width: style.full_width,
            height: style.height,
            color_range: style.color_range.clone(),
            x_accessor: DATE_ACCESSOR.to_string(),
            y_accessor: metric.value_field().to_string(),
            target: metric.target().to_string(),
        }
    }

    /// Width in pixels given the style's page and chart widths.
    pub const fn width(&self, style: &ChartStyleConfig) -> u32 {
        if self.full_width {
            style.page_width
        } else {
            style.width
        }
    }
}
