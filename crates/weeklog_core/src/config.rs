//! YAML configuration loading.
//!
//! # Responsibility
//! - Load the typed process configuration exactly once at startup.
//! - Expand `~`-prefixed paths against the home directory.
//!
//! # Invariants
//! - Configuration is immutable after load; a fresh process picks up edits.
//! - Store refs stay opaque strings; the core never interprets them.

use crate::store::BlockRef;
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration load failure.
#[derive(Debug)]
pub enum ConfigError {
    NotFound(PathBuf),
    Io(PathBuf, std::io::Error),
    Parse(serde_yaml::Error),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(path) => write!(f, "configuration file not found: {}", path.display()),
            Self::Io(path, err) => {
                write!(f, "failed to read configuration {}: {err}", path.display())
            }
            Self::Parse(err) => write!(f, "invalid configuration: {err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NotFound(_) => None,
            Self::Io(_, err) => Some(err),
            Self::Parse(err) => Some(err),
        }
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(value: serde_yaml::Error) -> Self {
        Self::Parse(value)
    }
}

/// Top-level process configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub store: StoreConfig,
    pub report: ReportConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Remote document store locations.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Shared daily-log location, one for all days.
    pub daily_log_ref: String,
    /// Project registry location.
    pub project_registry_ref: String,
}

impl StoreConfig {
    pub fn daily_log(&self) -> BlockRef {
        BlockRef::new(self.daily_log_ref.clone())
    }

    pub fn project_registry(&self) -> BlockRef {
        BlockRef::new(self.project_registry_ref.clone())
    }
}

/// Weekly report recipients and templating.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    #[serde(default)]
    pub to: Vec<String>,
    #[serde(default)]
    pub cc: Vec<String>,
    /// Sender name used for the sign-off.
    pub your_name: String,
    #[serde(default = "default_subject_template")]
    pub subject_template: String,
    /// Optional body template file; the default body is used when absent.
    #[serde(default)]
    pub template_path: Option<PathBuf>,
}

fn default_subject_template() -> String {
    "Weekly Update: {week_start} - {week_end}".to_string()
}

/// Optional file-logging settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub dir: Option<PathBuf>,
}

impl Config {
    /// Loads and validates the YAML configuration at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let raw =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        let mut config: Config = serde_yaml::from_str(&raw)?;

        if let Some(template) = config.report.template_path.take() {
            config.report.template_path = Some(expand_user(template));
        }
        if let Some(dir) = config.logging.dir.take() {
            config.logging.dir = Some(expand_user(dir));
        }
        Ok(config)
    }
}

/// Replaces a leading `~` with the home directory, when one is known.
fn expand_user(path: PathBuf) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path;
    };
    match std::env::var_os("HOME") {
        Some(home) => PathBuf::from(home).join(rest),
        None => path,
    }
}
