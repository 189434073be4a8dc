//! Common type definitions for the repository activity domain.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

use crate::error::GhReportError;

/// A time series served by the GHData backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    /// Commits per period.
    Commits,
    /// Stargazers (watchers) per period.
    Stargazers,
    /// Forks per period.
    Forks,
    /// Issues opened per period.
    Issues,
    /// Merged pull requests per period.
    Pulls,
}

impl Metric {
    /// Every metric the backend serves, in report order.
    pub const ALL: [Self; 5] = [
        Self::Commits,
        Self::Stargazers,
        Self::Forks,
        Self::Issues,
        Self::Pulls,
    ];

    /// The series drawn when no explicit selection is configured.
    pub const DEFAULT_REPORT: [Self; 3] = [Self::Commits, Self::Stargazers, Self::Forks];

    /// Path segment under `timeseries/` on the API.
    pub const fn endpoint(self) -> &'static str {
        match self {
            Self::Commits => "commits",
            Self::Stargazers => "stargazers",
            Self::Forks => "forks",
            Self::Issues => "issues",
            Self::Pulls => "pulls",
        }
    }

    /// Name of the count field in each record of this series.
    ///
    /// These follow the backend's table names, hence `watchers` for stars
    /// and `projects` for forks.
    pub const fn value_field(self) -> &'static str {
        match self {
            Self::Commits => "commits",
            Self::Stargazers => "watchers",
            Self::Forks => "projects",
            Self::Issues => "issues",
            Self::Pulls => "pull_requests",
        }
    }

    /// Chart title.
    pub const fn title(self) -> &'static str {
        match self {
            Self::Commits => "Commits/Day",
            Self::Stargazers => "Stars/Day",
            Self::Forks => "Forks/Day",
            Self::Issues => "Issues/Day",
            Self::Pulls => "Pull Requests/Day",
        }
    }

    /// Selector of the page region the chart is drawn into.
    pub const fn target(self) -> &'static str {
        match self {
            Self::Commits => "#commits-over-time",
            Self::Stargazers => "#stargazers-over-time",
            Self::Forks => "#forks-over-time",
            Self::Issues => "#issues-over-time",
            Self::Pulls => "#pulls-over-time",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.endpoint())
    }
}

impl FromStr for Metric {
    type Err = GhReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|metric| metric.endpoint().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| GhReportError::config(format!("unknown series '{s}'")))
    }
}

/// How the records are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    /// One marker per record.
    #[default]
    Point,
    /// Records joined in order by a line.
    Line,
}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Point => f.write_str("point"),
            Self::Line => f.write_str("line"),
        }
    }
}

/// One row of a time series exactly as the API serves it:
/// `{"date": "...", "<field>": <count>, ...}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeriesRecord {
    fields: Map<String, Value>,
}

impl SeriesRecord {
    /// Builds a record with a date and a single numeric field.
    pub fn new(date: impl Into<String>, field: impl Into<String>, value: f64) -> Self {
        let mut fields = Map::new();
        fields.insert("date".to_string(), Value::String(date.into()));
        fields.insert(field.into(), Value::from(value));
        Self { fields }
    }

    /// Raw field access.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Field as a string, if it is one.
    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.fields.get(field).and_then(Value::as_str)
    }

    /// Field as a number, if it is one.
    pub fn get_f64(&self, field: &str) -> Option<f64> {
        self.fields.get(field).and_then(Value::as_f64)
    }

    /// Sets or replaces a field.
    pub fn insert(&mut self, field: impl Into<String>, value: Value) {
        self.fields.insert(field.into(), value);
    }

    /// Names of all fields in the record.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}

/// A [`SeriesRecord`] whose date field has been parsed into a timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct DatedRecord {
    /// Parsed timestamp of the record.
    pub date: DateTime<Utc>,
    /// The record as served, including the original date string.
    pub record: SeriesRecord,
}

impl DatedRecord {
    /// Numeric value of `field`, if present.
    pub fn value(&self, field: &str) -> Option<f64> {
        self.record.get_f64(field)
    }
}
