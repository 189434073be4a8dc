//! Report controller.
//!
//! On start the controller reads the repository from the page URL, labels
//! the page and runs one fetch → convert → render pipeline per series. The
//! pipelines run concurrently and never wait on each other; a failing series
//! is logged and its region stays empty.

use futures::future::join_all;
use ghreport_common::{convert_dates, GhReportError, Metric, Result, API_DATE_FORMAT};
use ghreport_config::{ApiConfig, ChartStyleConfig, Config};
use ghreport_graphs::{ActivitySource, ChartRenderer, ChartSpec};
use tracing::{info, instrument, warn};

use crate::page::{PageEnvironment, REPO_LABEL_ID};
use crate::query::QueryParams;

/// Settings the controller runs with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOptions {
    /// Server the source connects to.
    pub api: ApiConfig,
    /// Series to draw.
    pub series: Vec<Metric>,
    /// Chart styling shared by every series.
    pub style: ChartStyleConfig,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            series: Metric::DEFAULT_REPORT.to_vec(),
            style: ChartStyleConfig::default(),
        }
    }
}

impl From<&Config> for ReportOptions {
    fn from(config: &Config) -> Self {
        Self {
            api: config.api.clone(),
            series: config.report.series.clone(),
            style: config.charts.clone(),
        }
    }
}

/// Result of one series pipeline: the number of plotted records.
pub type PipelineResult = Result<usize>;

/// What a started report did.
#[derive(Debug)]
pub struct ReportOutcome {
    /// Owner read from the page URL.
    pub owner: Option<String>,
    /// Repository read from the page URL.
    pub repo: Option<String>,
    /// One entry per series, in configured order.
    pub pipelines: Vec<(Metric, PipelineResult)>,
}

impl ReportOutcome {
    /// Result of the pipeline for `metric`.
    pub fn result(&self, metric: Metric) -> Option<&PipelineResult> {
        self.pipelines
            .iter()
            .find(|(m, _)| *m == metric)
            .map(|(_, result)| result)
    }

    /// Number of series drawn.
    pub fn rendered(&self) -> usize {
        self.pipelines.iter().filter(|(_, result)| result.is_ok()).count()
    }

    /// Series that failed, with their errors.
    pub fn failures(&self) -> impl Iterator<Item = (Metric, &GhReportError)> {
        self.pipelines
            .iter()
            .filter_map(|(metric, result)| result.as_ref().err().map(|e| (*metric, e)))
    }
}

/// Builds the activity report for the repository named by the page URL.
pub struct ReportController<'a, P, S, R> {
    page: &'a P,
    source: S,
    renderer: &'a R,
    params: QueryParams,
    options: ReportOptions,
}

impl<'a, P, S, R> ReportController<'a, P, S, R>
where
    P: PageEnvironment,
    S: ActivitySource,
    R: ChartRenderer,
{
    /// Reads the repository from the page URL and connects a source for it.
    ///
    /// `connect` receives the API settings with the owner and repo exactly
    /// as read; absent parameters are passed on as `None`.
    pub fn new<F>(page: &'a P, renderer: &'a R, options: ReportOptions, connect: F) -> Result<Self>
    where
        F: FnOnce(&ApiConfig, Option<String>, Option<String>) -> Result<S>,
    {
        let url = page.current_url();
        let params = QueryParams::from_url(&url)?;
        if params.owner.is_none() || params.repo.is_none() {
            warn!(url = %url, "Page URL does not name both owner and repo");
        }

        let source = connect(&options.api, params.owner.clone(), params.repo.clone())?;
        Ok(Self {
            page,
            source,
            renderer,
            params,
            options,
        })
    }

    /// Creates the controller and builds the report straight away.
    pub async fn start<F>(page: &'a P, renderer: &'a R, options: ReportOptions, connect: F) -> Result<ReportOutcome>
    where
        F: FnOnce(&ApiConfig, Option<String>, Option<String>) -> Result<S>,
    {
        Self::new(page, renderer, options, connect)?.build_report().await
    }

    /// Repository read from the page URL.
    pub const fn params(&self) -> &QueryParams {
        &self.params
    }

    /// Labels the page and draws every configured series.
    ///
    /// Only a failure to set the label is returned as an error; series
    /// failures are reported in the outcome.
    #[instrument(skip(self), fields(owner = ?self.params.owner, repo = ?self.params.repo, renderer = self.renderer.name()))]
    pub async fn build_report(&self) -> Result<ReportOutcome> {
        self.page.set_text(REPO_LABEL_ID, &self.params.label())?;

        let pipelines = self
            .options
            .series
            .iter()
            .map(|&metric| async move { (metric, self.run_pipeline(metric).await) });
        let pipelines = join_all(pipelines).await;

        let outcome = ReportOutcome {
            owner: self.params.owner.clone(),
            repo: self.params.repo.clone(),
            pipelines,
        };
        info!(
            rendered = outcome.rendered(),
            total = outcome.pipelines.len(),
            "Report built for {}",
            self.params.label()
        );
        Ok(outcome)
    }

    async fn run_pipeline(&self, metric: Metric) -> PipelineResult {
        let result = self.draw_series(metric).await;
        if let Err(e) = &result {
            warn!(
                series = %metric,
                category = e.category(),
                error = %e,
                "Series not drawn; region left empty"
            );
        }
        result
    }

    async fn draw_series(&self, metric: Metric) -> PipelineResult {
        let spec = ChartSpec::for_metric(metric, &self.options.style);
        let records = self.source.fetch(metric).await?;
        let data = convert_dates(records, &spec.x_accessor, API_DATE_FORMAT)?;
        let markup = self.renderer.render(&spec, &data).await?;
        self.page.render_region(&spec.target, &markup)?;
        Ok(data.len())
    }
}
