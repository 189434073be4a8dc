//! Runtime validation of a loaded configuration.

use crate::schema::Config;
use ghreport_common::{parse_hex_color, GhReportError, Result};
use std::collections::HashSet;
use url::Url;

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates a configuration, reporting the first problem found.
    pub fn validate(config: &Config) -> Result<()> {
        Self::validate_api(config)?;
        Self::validate_report(config)?;
        Self::validate_charts(config)?;
        Ok(())
    }

    fn validate_api(config: &Config) -> Result<()> {
        let url = Url::parse(&config.api.base_url).map_err(|e| {
            GhReportError::config_with_source(format!("api.base_url '{}' is not a valid URL", config.api.base_url), e)
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(GhReportError::config(format!(
                "api.base_url must use http or https, got '{}'",
                url.scheme()
            )));
        }

        if config.api.timeout_seconds == 0 {
            return Err(GhReportError::config("api.timeout_seconds must be greater than 0"));
        }

        Ok(())
    }

    fn validate_report(config: &Config) -> Result<()> {
        if config.report.series.is_empty() {
            return Err(GhReportError::config("report.series cannot be empty"));
        }

        let mut seen = HashSet::new();
        for metric in &config.report.series {
            if !seen.insert(metric) {
                return Err(GhReportError::config(format!("report.series lists '{metric}' twice")));
            }
        }

        Ok(())
    }

    fn validate_charts(config: &Config) -> Result<()> {
        let charts = &config.charts;

        if charts.height == 0 || charts.width == 0 || charts.page_width == 0 {
            return Err(GhReportError::config("chart dimensions must be greater than 0"));
        }

        if charts.color_range.is_empty() {
            return Err(GhReportError::config("charts.color_range cannot be empty"));
        }

        if let Some(bad) = charts.color_range.iter().find(|c| parse_hex_color(c).is_none()) {
            return Err(GhReportError::config(format!(
                "charts.color_range entry '{bad}' is not a #rgb or #rrggbb color"
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ghreport_common::Metric;

    #[test]
    fn test_default_config_is_valid() {
        assert!(ConfigValidator::validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_rejects_bad_base_url() {
        let mut config = Config::default();
        config.api.base_url = "not a url".to_string();
        assert!(ConfigValidator::validate(&config).is_err());

        config.api.base_url = "ftp://example.com/".to_string();
        let err = ConfigValidator::validate(&config).unwrap_err();
        assert!(err.to_string().contains("http or https"));
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let mut config = Config::default();
        config.api.timeout_seconds = 0;
        assert!(ConfigValidator::validate(&config).is_err());
    }

    #[test]
    fn test_rejects_duplicate_series() {
        let mut config = Config::default();
        config.report.series = vec![Metric::Commits, Metric::Forks, Metric::Commits];
        let err = ConfigValidator::validate(&config).unwrap_err();
        assert!(err.to_string().contains("'commits' twice"));

        config.report.series.clear();
        assert!(ConfigValidator::validate(&config).is_err());
    }

    #[test]
    fn test_rejects_bad_colors() {
        let mut config = Config::default();
        config.charts.color_range = vec!["grey".to_string()];
        assert!(ConfigValidator::validate(&config).is_err());

        config.charts.color_range.clear();
        assert!(ConfigValidator::validate(&config).is_err());
    }

    #[test]
    fn test_rejects_zero_height() {
        let mut config = Config::default();
        config.charts.height = 0;
        assert!(ConfigValidator::validate(&config).is_err());
    }
}
