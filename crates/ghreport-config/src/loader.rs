//! Configuration loading with environment variable overrides.

use crate::schema::Config;
use ghreport_common::{GhReportError, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable naming a configuration file.
pub const CONFIG_PATH_ENV: &str = "GHREPORT_CONFIG_PATH";

/// File looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "ghreport.toml";

/// Configuration loader for the application
pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads the configuration.
    ///
    /// Source order: `path`, then `GHREPORT_CONFIG_PATH`, then `ghreport.toml`
    /// in the working directory, then built-in defaults. Environment overrides
    /// are applied on top, then the result is normalized and validated.
    pub fn load(path: Option<&Path>) -> Result<Config> {
        Self::finish(Self::read(Self::source_path(path).as_deref())?)
    }

    /// The file [`ConfigLoader::load`] would read, if any.
    pub fn source_path(path: Option<&Path>) -> Option<PathBuf> {
        path.map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from))
            .or_else(|| {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                default.exists().then_some(default)
            })
    }

    /// Reads `source` (or the defaults when `None`) and applies environment
    /// overrides. The result is neither normalized nor validated, so callers
    /// can layer further overrides before checking it.
    pub fn read(source: Option<&Path>) -> Result<Config> {
        let mut config = match source {
            Some(path) => Self::read_file(path)?,
            None => {
                debug!("No configuration file found, using defaults");
                Config::default()
            }
        };

        Self::apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Loads a configuration file without consulting the environment.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Config> {
        Self::finish(Self::read_file(path.as_ref())?)
    }

    fn read_file(path: &Path) -> Result<Config> {
        debug!(path = %path.display(), "Reading configuration");
        let text = std::fs::read_to_string(path).map_err(|e| {
            GhReportError::config_with_source(format!("cannot read configuration file {}", path.display()), e)
        })?;
        Config::from_toml_str(&text)
    }

    fn finish(mut config: Config) -> Result<Config> {
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    /// Applies `GHREPORT_*` overrides, reading variables through `lookup`.
    pub fn apply_env_overrides<F>(config: &mut Config, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("GHREPORT_API_URL") {
            config.api.base_url = url;
        }

        if let Some(timeout) = lookup("GHREPORT_API_TIMEOUT") {
            config.api.timeout_seconds = timeout.trim().parse().map_err(|e| {
                GhReportError::config_with_source(format!("GHREPORT_API_TIMEOUT '{timeout}' is not a number"), e)
            })?;
        }

        if let Some(output) = lookup("GHREPORT_OUTPUT") {
            config.report.output_path = PathBuf::from(output);
        }

        if let Some(level) = lookup("GHREPORT_LOG_LEVEL") {
            config.logging.level = level;
        }

        Ok(())
    }
}
