//! Trait seams for fetching series and rendering charts.

use async_trait::async_trait;
use ghreport_common::{DatedRecord, Metric, Result, SeriesRecord};

use crate::chart::ChartSpec;

/// Source of repository activity time series.
#[async_trait]
pub trait ActivitySource: Send + Sync {
    /// Fetches the full series for `metric`, in the order served.
    async fn fetch(&self, metric: Metric) -> Result<Vec<SeriesRecord>>;
}

/// Trait for chart renderers that turn a series into markup for a page region.
#[async_trait]
pub trait ChartRenderer: Send + Sync {
    /// Renders `data` according to `spec`.
    async fn render(&self, spec: &ChartSpec, data: &[DatedRecord]) -> Result<String>;

    /// Gets the name of this renderer.
    fn name(&self) -> &'static str;
}
