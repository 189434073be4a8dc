//! Command line interface.

use clap::Parser;
use ghreport_common::{Metric, Result};
use ghreport_config::{Config, ConfigLoader};
use std::path::PathBuf;

/// Render the GHData activity report for the repository named in a page URL.
#[derive(Debug, Clone, Parser)]
#[command(name = "ghreport", version, about)]
pub struct Cli {
    /// Page URL whose query string names the repository,
    /// e.g. `http://localhost/?owner=rails&repo=rails`.
    #[arg(long, env = "GHREPORT_PAGE_URL")]
    pub url: String,

    /// Configuration file (defaults to `$GHREPORT_CONFIG_PATH` or `ghreport.toml`).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Where to write the rendered page.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Base URL of the GHData server.
    #[arg(long)]
    pub base_url: Option<String>,

    /// Series to draw, comma separated.
    #[arg(long, value_delimiter = ',')]
    pub series: Vec<Metric>,

    /// Log filter directive, e.g. `debug` or `ghreport=trace`.
    #[arg(long)]
    pub log_level: Option<String>,
}

impl Cli {
    /// Configuration file to read, if any.
    pub fn config_source(&self) -> Option<PathBuf> {
        ConfigLoader::source_path(self.config.as_deref())
    }

    /// Reads the configuration file and environment, applies the flags, then
    /// normalizes and validates the result once.
    pub fn load_config(&self) -> Result<Config> {
        let mut config = ConfigLoader::read(self.config_source().as_deref())?;
        self.apply(&mut config);
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    /// Applies the flags that were given on top of `config`.
    pub fn apply(&self, config: &mut Config) {
        if let Some(output) = &self.output {
            config.report.output_path.clone_from(output);
        }
        if let Some(base_url) = &self.base_url {
            config.api.base_url.clone_from(base_url);
        }
        if !self.series.is_empty() {
            config.report.series.clone_from(&self.series);
        }
        if let Some(level) = &self.log_level {
            config.logging.level.clone_from(level);
        }
    }
}
