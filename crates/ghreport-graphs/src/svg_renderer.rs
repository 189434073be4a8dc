//! SVG chart renderer built on plotters.

use async_trait::async_trait;
use ghreport_common::{format_date, parse_hex_color, DatedRecord, GhReportError, Result};
use ghreport_config::ChartStyleConfig;
use plotters::prelude::*;
use tracing::debug;

use crate::chart::{ChartSpec, ChartType};
use crate::least_squares::LeastSquares;
use crate::traits::ChartRenderer;
use crate::utils::GraphUtils;

const TITLE_FONT_SIZE: u32 = 18;
const LABEL_FONT_SIZE: u32 = 12;
const POINT_RADIUS: u32 = 3;
const TREND_COLOR: RGBColor = RGBColor(80, 80, 80);

/// Draws a series as an SVG document.
#[derive(Debug, Clone)]
pub struct SvgChartRenderer {
    style: ChartStyleConfig,
}

impl SvgChartRenderer {
    /// Creates a renderer using `style` for page and chart widths.
    pub const fn new(style: ChartStyleConfig) -> Self {
        Self { style }
    }

    /// Extracts `(x, y)` pairs, failing on records without a numeric y.
    fn points(spec: &ChartSpec, data: &[DatedRecord]) -> Result<Vec<(f64, f64)>> {
        data.iter()
            .enumerate()
            .map(|(row, record)| {
                let y = record.value(&spec.y_accessor).ok_or_else(|| {
                    GhReportError::render(format!(
                        "row {row}: field '{}' is missing or not a number",
                        spec.y_accessor
                    ))
                })?;
                Ok((GraphUtils::x_value(record.date), y))
            })
            .collect()
    }

    fn series_color(spec: &ChartSpec) -> Result<RGBColor> {
        let raw = spec
            .color_range
            .first()
            .ok_or_else(|| GhReportError::render(format!("chart '{}' has no colors", spec.title)))?;
        let (r, g, b) =
            parse_hex_color(raw).ok_or_else(|| GhReportError::render(format!("invalid color '{raw}'")))?;
        Ok(RGBColor(r, g, b))
    }

    fn draw(&self, spec: &ChartSpec, points: &[(f64, f64)], color: RGBColor) -> Result<String> {
        let width = spec.width(&self.style);
        let ranges = GraphUtils::axis_ranges(points);
        let mut svg = String::new();

        {
            let root = SVGBackend::with_string(&mut svg, (width, spec.height)).into_drawing_area();
            root.fill(&WHITE).map_err(plot_error)?;

            let mut chart = ChartBuilder::on(&root)
                .caption(&spec.title, ("sans-serif", TITLE_FONT_SIZE))
                .margin(10)
                .x_label_area_size(30)
                .y_label_area_size(40)
                .build_cartesian_2d(ranges.x_min..ranges.x_max, ranges.y_min..ranges.y_max)
                .map_err(plot_error)?;

            let x_label = |x: &f64| GraphUtils::x_date(*x).map(format_date).unwrap_or_default();
            chart
                .configure_mesh()
                .disable_mesh()
                .x_labels(6)
                .y_labels(5)
                .x_label_formatter(&x_label)
                .label_style(("sans-serif", LABEL_FONT_SIZE))
                .draw()
                .map_err(plot_error)?;

            match spec.chart_type {
                ChartType::Point => {
                    chart
                        .draw_series(
                            points
                                .iter()
                                .map(|&point| Circle::new(point, POINT_RADIUS, color.filled())),
                        )
                        .map_err(plot_error)?;
                }
                ChartType::Line => {
                    chart
                        .draw_series(LineSeries::new(points.iter().copied(), color.stroke_width(2)))
                        .map_err(plot_error)?;
                }
            }

            if spec.least_squares {
                if let Some(fit) = LeastSquares::fit(points) {
                    let (first, last) = points
                        .iter()
                        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &(x, _)| (lo.min(x), hi.max(x)));
                    debug!(slope = fit.slope, "Drawing trend line for {}", spec.title);
                    chart
                        .draw_series(LineSeries::new(
                            [(first, fit.predict(first)), (last, fit.predict(last))],
                            TREND_COLOR.stroke_width(2),
                        ))
                        .map_err(plot_error)?;
                }
            }

            root.present().map_err(plot_error)?;
        }

        Ok(svg)
    }
}

#[async_trait]
impl ChartRenderer for SvgChartRenderer {
    async fn render(&self, spec: &ChartSpec, data: &[DatedRecord]) -> Result<String> {
        let points = Self::points(spec, data)?;
        let color = Self::series_color(spec)?;
        let svg = self.draw(spec, &points, color)?;
        debug!(points = points.len(), bytes = svg.len(), "Rendered {}", spec.target);
        Ok(svg)
    }

    fn name(&self) -> &'static str {
        "svg"
    }
}

fn plot_error<E>(err: E) -> GhReportError
where
    E: std::error::Error + Send + Sync + 'static,
{
    GhReportError::render_with_source("plotting failed", err)
}
