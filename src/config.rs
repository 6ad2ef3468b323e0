//! Configuration loading and logging setup
//!
//! Config lives in `~/.creation-report/config.json`. Every field is optional;
//! command-line flags override whatever the file sets.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use serde::Deserialize;
use tracing_subscriber::{fmt, EnvFilter};

use crate::render::DEFAULT_BAR_WIDTH;
use crate::services::chart::DEFAULT_MAX_HEIGHT;
use crate::services::date_format::DEFAULT_DATE_FORMAT;
use crate::types::{ReportError, Result};

const APP_DIR: &str = ".creation-report";

/// Output layout for log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
    /// Single-line `fmt` output, used for any unrecognized value
    Text,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl LoggingConfig {
    pub fn log_format(&self) -> LogFormat {
        match self.format.as_str() {
            "json" => LogFormat::Json,
            "pretty" => LogFormat::Pretty,
            _ => LogFormat::Text,
        }
    }

    /// Initialize the tracing subscriber. `RUST_LOG` takes precedence over `level`.
    /// Later calls are no-ops once a global subscriber is set.
    pub fn init(&self) {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level));

        match self.log_format() {
            LogFormat::Json => {
                fmt()
                    .json()
                    .with_env_filter(filter)
                    .with_writer(std::io::stderr)
                    .try_init()
                    .ok();
            }
            LogFormat::Pretty => {
                fmt()
                    .pretty()
                    .with_env_filter(filter)
                    .with_writer(std::io::stderr)
                    .try_init()
                    .ok();
            }
            LogFormat::Text => {
                fmt()
                    .with_env_filter(filter)
                    .with_writer(std::io::stderr)
                    .try_init()
                    .ok();
            }
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".into(),
            format: "pretty".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ReportConfig {
    /// chrono pattern for parsing parameters and formatting labels
    pub date_format: String,
    /// Height of the tallest bar
    pub max_height: u32,
    /// Character width of text bars
    pub bar_width: usize,
    /// Directory scanned for issue JSONL files
    pub data_dir: Option<PathBuf>,
    pub projects_file: Option<PathBuf>,
    pub logging: LoggingConfig,
    /// Message text overrides keyed by message key
    pub messages: HashMap<String, String>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            date_format: DEFAULT_DATE_FORMAT.into(),
            max_height: DEFAULT_MAX_HEIGHT,
            bar_width: DEFAULT_BAR_WIDTH,
            data_dir: None,
            projects_file: None,
            logging: LoggingConfig::default(),
            messages: HashMap::new(),
        }
    }
}

impl ReportConfig {
    /// Load from an explicit path, or from the default location when `path`
    /// is `None`. A missing default file yields defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::from_file(p),
            None => match default_config_path() {
                Some(p) if p.exists() => Self::from_file(&p),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            ReportError::Config(format!("Cannot read {}: {}", path.display(), e))
        })?;
        serde_json::from_str(&content)
            .map_err(|e| ReportError::Config(format!("Invalid config {}: {}", path.display(), e)))
    }

    pub fn data_dir(&self) -> Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => app_dir().map(|d| d.join("issues")),
        }
    }

    pub fn projects_file(&self) -> Result<PathBuf> {
        match &self.projects_file {
            Some(file) => Ok(file.clone()),
            None => app_dir().map(|d| d.join("projects.json")),
        }
    }
}

fn app_dir() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new()
        .ok_or_else(|| ReportError::Config("Cannot determine home directory".into()))?;
    Ok(base_dirs.home_dir().join(APP_DIR))
}

fn default_config_path() -> Option<PathBuf> {
    app_dir().ok().map(|d| d.join("config.json"))
}
