//! Default values.

use crate::schema::*;
use ghreport_common::logging::LogFormat;
use ghreport_common::{ChartType, Metric};
use std::path::PathBuf;

/// Base URL of a GHData server running locally.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/";

/// Default chart height in pixels.
pub const DEFAULT_CHART_HEIGHT: u32 = 300;

/// Muted grey used for the plotted points.
pub const DEFAULT_POINT_COLOR: &str = "#aaa";

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            report: ReportConfig::default(),
            charts: ChartStyleConfig::default(),
            logging: LoggingSection::default(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_seconds: 30,
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            series: Metric::DEFAULT_REPORT.to_vec(),
            output_path: PathBuf::from("report.html"),
        }
    }
}

impl Default for ChartStyleConfig {
    fn default() -> Self {
        Self {
            chart_type: ChartType::Point,
            height: DEFAULT_CHART_HEIGHT,
            width: 600,
            page_width: 960,
            color_range: vec![DEFAULT_POINT_COLOR.to_string()],
            least_squares: true,
            full_width: true,
        }
    }
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}
