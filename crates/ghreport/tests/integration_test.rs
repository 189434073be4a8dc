//! Integration tests for the ghreport crate.
//!
//! The controller is driven through its public API with a mocked activity
//! source and a recording renderer, and end to end against a mock GHData
//! server.

use async_trait::async_trait;
use ghreport::{HtmlPage, PageEnvironment, ReportController, ReportOptions, REPO_LABEL_ID};
use ghreport_common::test_utils::{init_test_logging, series_fixtures};
use ghreport_common::{DatedRecord, GhReportError, Metric, Result, SeriesRecord};
use ghreport_config::{ApiConfig, ChartStyleConfig};
use ghreport_graphs::{ActivitySource, ChartRenderer, ChartSpec, ChartType, GhDataClient, SvgChartRenderer};
use mockall::mock;
use mockall::predicate::eq;
use parking_lot::Mutex;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

mock! {
    Source {}

    #[async_trait]
    impl ActivitySource for Source {
        async fn fetch(&self, metric: Metric) -> Result<Vec<SeriesRecord>>;
    }
}

/// Records every chart it is asked to draw.
#[derive(Default)]
struct RecordingRenderer {
    calls: Mutex<Vec<(ChartSpec, usize)>>,
}

impl RecordingRenderer {
    fn calls(&self) -> Vec<(ChartSpec, usize)> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl ChartRenderer for RecordingRenderer {
    async fn render(&self, spec: &ChartSpec, data: &[DatedRecord]) -> Result<String> {
        self.calls.lock().push((spec.clone(), data.len()));
        Ok(format!("<svg data-title=\"{}\"></svg>", spec.title))
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}

const PAGE_URL: &str = "http://localhost/report.html?owner=acme&repo=widget";

fn page(url: &str) -> HtmlPage {
    HtmlPage::new(url, &Metric::DEFAULT_REPORT)
}

fn source_with_all_series() -> MockSource {
    let mut source = MockSource::new();
    for metric in Metric::DEFAULT_REPORT {
        source
            .expect_fetch()
            .with(eq(metric))
            .times(1)
            .returning(|metric| Ok(series_fixtures::sample_series(metric)));
    }
    source
}

#[tokio::test]
async fn test_labels_page_and_draws_every_series_once() {
    init_test_logging();
    let page = page(PAGE_URL);
    let renderer = RecordingRenderer::default();
    let source = source_with_all_series();

    let outcome = ReportController::start(&page, &renderer, ReportOptions::default(), |api, owner, repo| {
        assert_eq!(api, &ApiConfig::default());
        assert_eq!(owner.as_deref(), Some("acme"));
        assert_eq!(repo.as_deref(), Some("widget"));
        Ok(source)
    })
    .await
    .unwrap();

    assert_eq!(page.label().as_deref(), Some("acme / widget"));
    assert_eq!(outcome.rendered(), 3);

    let calls = renderer.calls();
    assert_eq!(calls.len(), 3);
    for metric in Metric::DEFAULT_REPORT {
        let matching: Vec<_> = calls.iter().filter(|(spec, _)| spec.target == metric.target()).collect();
        assert_eq!(matching.len(), 1, "{metric} drawn once");

        let (spec, points) = matching[0];
        assert_eq!(spec.chart_type, ChartType::Point);
        assert!(spec.least_squares);
        assert!(spec.full_width);
        assert_eq!(spec.height, 300);
        assert_eq!(spec.color_range, vec!["#aaa".to_string()]);
        assert_eq!(spec.x_accessor, "date");
        assert_eq!(spec.y_accessor, metric.value_field());
        assert_eq!(spec.title, metric.title());
        assert_eq!(*points, 6);

        let region = page.region(metric.target()).unwrap();
        assert!(region.contains(metric.title()));
    }
}

#[tokio::test]
async fn test_failed_series_leaves_only_its_region_empty() {
    let page = page(PAGE_URL);
    let renderer = RecordingRenderer::default();
    let mut source = MockSource::new();
    source
        .expect_fetch()
        .with(eq(Metric::Commits))
        .times(1)
        .returning(|_| Err(GhReportError::network("Connection error")));
    for metric in [Metric::Stargazers, Metric::Forks] {
        source
            .expect_fetch()
            .with(eq(metric))
            .times(1)
            .returning(|metric| Ok(series_fixtures::sample_series(metric)));
    }

    let outcome = ReportController::start(&page, &renderer, ReportOptions::default(), |_, _, _| Ok(source))
        .await
        .unwrap();

    assert!(outcome.result(Metric::Commits).unwrap().is_err());
    assert_eq!(outcome.rendered(), 2);
    assert_eq!(page.region("#commits-over-time"), None);
    assert!(page.region("#stargazers-over-time").is_some());
    assert!(page.region("#forks-over-time").is_some());
    assert_eq!(renderer.calls().len(), 2);
}

#[tokio::test]
async fn test_unparseable_dates_fail_only_that_series() {
    let page = page(PAGE_URL);
    let renderer = RecordingRenderer::default();
    let mut source = MockSource::new();
    source.expect_fetch().times(3).returning(|metric| {
        if metric == Metric::Forks {
            Ok(vec![SeriesRecord::new("2020-01-01", "projects", 1.0)])
        } else {
            Ok(series_fixtures::sample_series(metric))
        }
    });

    let outcome = ReportController::start(&page, &renderer, ReportOptions::default(), |_, _, _| Ok(source))
        .await
        .unwrap();

    let forks = outcome.result(Metric::Forks).unwrap().as_ref().unwrap_err();
    assert!(forks.to_string().contains("row 0"));
    assert_eq!(page.region("#forks-over-time"), None);
    assert_eq!(outcome.rendered(), 2);
}

#[tokio::test]
async fn test_missing_parameters_label_null() {
    let page = page("http://localhost/report.html");
    let renderer = RecordingRenderer::default();
    let source = source_with_all_series();

    let outcome = ReportController::start(&page, &renderer, ReportOptions::default(), |_, owner, repo| {
        assert_eq!(owner, None);
        assert_eq!(repo, None);
        Ok(source)
    })
    .await
    .unwrap();

    assert_eq!(page.label().as_deref(), Some("null / null"));
    assert_eq!(outcome.owner, None);
    assert_eq!(outcome.repo, None);
}

#[tokio::test]
async fn test_empty_parameters_are_kept_empty() {
    let page = page("http://localhost/?owner=&repo=widget");
    let renderer = RecordingRenderer::default();
    let source = source_with_all_series();

    ReportController::start(&page, &renderer, ReportOptions::default(), |_, owner, repo| {
        assert_eq!(owner.as_deref(), Some(""));
        assert_eq!(repo.as_deref(), Some("widget"));
        Ok(source)
    })
    .await
    .unwrap();

    assert_eq!(page.label().as_deref(), Some(" / widget"));
}

/// Answers after a per-series delay.
struct DelayedSource;

#[async_trait]
impl ActivitySource for DelayedSource {
    async fn fetch(&self, metric: Metric) -> Result<Vec<SeriesRecord>> {
        let delay = match metric {
            Metric::Commits => 150,
            Metric::Stargazers => 75,
            _ => 0,
        };
        tokio::time::sleep(Duration::from_millis(delay)).await;
        Ok(series_fixtures::sample_series(metric))
    }
}

#[tokio::test]
async fn test_series_render_as_they_arrive() {
    let page = page(PAGE_URL);
    let renderer = RecordingRenderer::default();

    ReportController::start(&page, &renderer, ReportOptions::default(), |_, _, _| Ok(DelayedSource))
        .await
        .unwrap();

    let order: Vec<String> = renderer.calls().into_iter().map(|(spec, _)| spec.title).collect();
    assert_eq!(order, vec!["Forks/Day", "Stars/Day", "Commits/Day"]);
}

#[tokio::test]
async fn test_configured_series_and_style() {
    let page = HtmlPage::new(PAGE_URL, &[Metric::Issues, Metric::Pulls]);
    let renderer = RecordingRenderer::default();
    let mut source = MockSource::new();
    source
        .expect_fetch()
        .times(2)
        .returning(|metric| Ok(series_fixtures::sample_series(metric)));
    let options = ReportOptions {
        series: vec![Metric::Issues, Metric::Pulls],
        style: ChartStyleConfig {
            least_squares: false,
            ..ChartStyleConfig::default()
        },
        ..ReportOptions::default()
    };

    let outcome = ReportController::start(&page, &renderer, options, |_, _, _| Ok(source))
        .await
        .unwrap();

    assert_eq!(outcome.rendered(), 2);
    assert!(renderer.calls().iter().all(|(spec, _)| !spec.least_squares));
    assert!(page.region("#pulls-over-time").unwrap().contains("Pull Requests/Day"));
}

async fn mount_series(server: &MockServer, metric: Metric) {
    let body = serde_json::to_value(series_fixtures::sample_series(metric)).unwrap();
    Mock::given(method("GET"))
        .and(path(format!("/api/unstable/acme/widget/timeseries/{}", metric.endpoint())))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_end_to_end_against_mock_server() {
    init_test_logging();
    let server = MockServer::start().await;
    mount_series(&server, Metric::Stargazers).await;
    mount_series(&server, Metric::Forks).await;
    Mock::given(method("GET"))
        .and(path("/api/unstable/acme/widget/timeseries/commits"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let options = ReportOptions {
        api: ApiConfig {
            base_url: format!("{}/", server.uri()),
            timeout_seconds: 5,
        },
        ..ReportOptions::default()
    };
    let page = page(PAGE_URL);
    let renderer = SvgChartRenderer::new(options.style.clone());

    let outcome = ReportController::start(&page, &renderer, options, GhDataClient::new)
        .await
        .unwrap();

    let commits = outcome.result(Metric::Commits).unwrap().as_ref().unwrap_err();
    assert_eq!(commits.status_code(), Some(500));
    assert_eq!(page.region("#commits-over-time"), None);

    let stars = page.region("#stargazers-over-time").unwrap();
    assert!(stars.starts_with("<svg"));
    assert!(stars.contains("Stars/Day"));

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("report.html");
    page.write_to(&output).unwrap();
    let html = std::fs::read_to_string(&output).unwrap();
    assert!(html.contains(&format!("<h1 id=\"{REPO_LABEL_ID}\">acme / widget</h1>")));
    assert!(html.contains("<div id=\"commits-over-time\" class=\"chart\"></div>"));
    assert!(html.contains("Forks/Day"));
    assert_eq!(page.current_url(), PAGE_URL);
}
