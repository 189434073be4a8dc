//! GHData API client.
//!
//! The backend serves pre-aggregated series at
//! `{base_url}api/unstable/{owner}/{repo}/timeseries/{series}` as a JSON
//! array of `{"date": ..., "<field>": <count>}` records.

use async_trait::async_trait;
use ghreport_common::{GhReportError, Metric, Result, SeriesRecord};
use ghreport_config::ApiConfig;
use reqwest::{Client, Response};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::traits::ActivitySource;

/// How an absent owner or repo appears in request paths.
const MISSING_SEGMENT: &str = "null";

/// Client for one repository's activity series.
#[derive(Debug, Clone)]
pub struct GhDataClient {
    client: Client,
    base_url: Url,
    owner: Option<String>,
    repo: Option<String>,
}

impl GhDataClient {
    /// Creates a client bound to `owner`/`repo` on the configured server.
    pub fn new(config: &ApiConfig, owner: Option<String>, repo: Option<String>) -> Result<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            GhReportError::config_with_source(format!("invalid API base URL '{}'", config.base_url), e)
        })?;
        if base_url.cannot_be_a_base() {
            return Err(GhReportError::config(format!(
                "API base URL '{}' cannot hold a path",
                config.base_url
            )));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| GhReportError::network_with_source("Failed to create HTTP client", e))?;

        Ok(Self {
            client,
            base_url,
            owner,
            repo,
        })
    }

    /// Repository owner this client was built with.
    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }

    /// Repository name this client was built with.
    pub fn repo(&self) -> Option<&str> {
        self.repo.as_deref()
    }

    /// URL of the series for `metric`.
    pub fn series_url(&self, metric: Metric) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| GhReportError::config("API base URL cannot hold a path"))?
            .pop_if_empty()
            .extend([
                "api",
                "unstable",
                self.owner().unwrap_or(MISSING_SEGMENT),
                self.repo().unwrap_or(MISSING_SEGMENT),
                "timeseries",
                metric.endpoint(),
            ]);
        Ok(url)
    }

    /// Commit counts over time.
    pub async fn commits(&self) -> Result<Vec<SeriesRecord>> {
        self.fetch(Metric::Commits).await
    }

    /// Stargazer counts over time.
    pub async fn stargazers(&self) -> Result<Vec<SeriesRecord>> {
        self.fetch(Metric::Stargazers).await
    }

    /// Fork counts over time.
    pub async fn forks(&self) -> Result<Vec<SeriesRecord>> {
        self.fetch(Metric::Forks).await
    }

    /// Issue counts over time.
    pub async fn issues(&self) -> Result<Vec<SeriesRecord>> {
        self.fetch(Metric::Issues).await
    }

    /// Merged pull request counts over time.
    pub async fn pulls(&self) -> Result<Vec<SeriesRecord>> {
        self.fetch(Metric::Pulls).await
    }

    async fn send(&self, url: Url) -> Result<Response> {
        debug!("Making request to: {}", url);

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                warn!("Request timeout: {}", e);
                GhReportError::network_with_source("Request timeout", e)
            } else if e.is_connect() {
                warn!("Connection error: {}", e);
                GhReportError::network_with_source("Connection error", e)
            } else {
                GhReportError::network_with_source("Request failed", e)
            }
        })?;

        let status = response.status();
        if status.is_success() {
            debug!("Request successful: {}", status);
            Ok(response)
        } else {
            warn!("API returned {}", status);
            Err(GhReportError::api_with_status(
                format!("API returned {status}"),
                status.as_u16(),
            ))
        }
    }
}

#[async_trait]
impl ActivitySource for GhDataClient {
    #[instrument(skip(self), fields(owner = ?self.owner, repo = ?self.repo))]
    async fn fetch(&self, metric: Metric) -> Result<Vec<SeriesRecord>> {
        let url = self.series_url(metric)?;
        let response = self.send(url).await?;

        let body = response
            .text()
            .await
            .map_err(|e| GhReportError::network_with_source("Failed to read response body", e))?;

        let records: Vec<SeriesRecord> = serde_json::from_str(&body)?;
        info!(records = records.len(), "Fetched {} series", metric);
        Ok(records)
    }
}
