//! Main entry point for GHReport.

use anyhow::Context;
use clap::Parser;
use ghreport::{Cli, HtmlPage, ReportController, ReportOptions};
use ghreport_common::logging::{init_logging, LoggingConfig};
use ghreport_graphs::{GhDataClient, SvgChartRenderer};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = cli.load_config().context("failed to load configuration")?;

    init_logging(&LoggingConfig::from(&config.logging)).context("failed to initialize logging")?;
    match cli.config_source() {
        Some(path) => info!(path = %path.display(), "Loaded configuration"),
        None => info!("No configuration file found, using defaults"),
    }
    info!("Starting GHReport against {}", config.api.base_url);

    let page = HtmlPage::new(cli.url.as_str(), &config.report.series);
    let renderer = SvgChartRenderer::new(config.charts.clone());

    let outcome = ReportController::start(&page, &renderer, ReportOptions::from(&config), GhDataClient::new)
        .await
        .context("failed to start report")?;

    for (metric, error) in outcome.failures() {
        warn!("{} chart missing: {}", metric, error);
    }

    page.write_to(&config.report.output_path)
        .with_context(|| format!("failed to write {}", config.report.output_path.display()))?;

    info!(
        rendered = outcome.rendered(),
        total = outcome.pipelines.len(),
        "Report written to {}",
        config.report.output_path.display()
    );
    Ok(())
}
