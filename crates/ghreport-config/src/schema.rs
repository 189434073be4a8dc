//! Configuration schema definitions using serde.

use ghreport_common::logging::{LogFormat, LoggingConfig};
use ghreport_common::{ChartType, GhReportError, Metric};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// GHData API configuration.
    pub api: ApiConfig,
    /// Report content and output.
    pub report: ReportConfig,
    /// Chart styling.
    pub charts: ChartStyleConfig,
    /// Logging configuration.
    pub logging: LoggingSection,
}

/// GHData API configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the GHData server, always ending with `/`.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_seconds: u64,
}

/// Report configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Series to draw, in page order.
    pub series: Vec<Metric>,
    /// Where the rendered HTML page is written.
    pub output_path: PathBuf,
}

/// Chart styling shared by every series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartStyleConfig {
    /// How each series is drawn.
    pub chart_type: ChartType,
    /// Chart height in pixels.
    pub height: u32,
    /// Chart width in pixels when not drawn full width.
    pub width: u32,
    /// Width of the page content area, used for full width charts.
    pub page_width: u32,
    /// Colors for the plotted points; the first one is used.
    pub color_range: Vec<String>,
    /// Whether to overlay a least-squares trend line.
    pub least_squares: bool,
    /// Whether charts span the page width.
    pub full_width: bool,
}

/// Logging section of the configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Filter directive, e.g. `info` or `ghreport=debug`.
    pub level: String,
    /// Output format.
    pub format: LogFormat,
}

impl From<&LoggingSection> for LoggingConfig {
    fn from(section: &LoggingSection) -> Self {
        Self {
            level: section.level.clone(),
            format: section.format,
            ..Self::default()
        }
    }
}

impl Config {
    /// Parses a configuration from TOML text. Missing fields take defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, GhReportError> {
        toml::from_str(text).map_err(|e| GhReportError::config_with_source("invalid TOML configuration", e))
    }

    /// Serializes the configuration to TOML.
    pub fn to_toml_string(&self) -> Result<String, GhReportError> {
        toml::to_string_pretty(self).map_err(|e| GhReportError::config_with_source("cannot serialize configuration", e))
    }

    /// Applies canonical forms: the base URL gets a trailing `/`.
    pub fn normalize(&mut self) {
        let trimmed = self.api.base_url.trim();
        self.api.base_url = if trimmed.ends_with('/') {
            trimmed.to_string()
        } else {
            format!("{trimmed}/")
        };
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), GhReportError> {
        crate::validator::ConfigValidator::validate(self)
    }
}
