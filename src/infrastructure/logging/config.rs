use std::path::PathBuf;

use anyhow::{Context, Result};
use figment::providers::{Format, Yaml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::domain::models::config::LogConfig;
use crate::infrastructure::config::ConfigError;

/// Logging settings, merged from the files named by the `log` sublevel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LogSettings {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_level")]
    pub level: String,

    /// Output format for stdout (json, pretty)
    #[serde(default)]
    pub format: LogFormat,

    /// Directory for log files; stdout only when unset
    #[serde(default)]
    pub dir: Option<PathBuf>,

    /// File name used inside `dir`
    #[serde(default = "default_file_name")]
    pub file_name: String,

    /// Mirror logs to stdout
    #[serde(default = "default_true")]
    pub enable_stdout: bool,

    /// Rotation policy for file output
    #[serde(default)]
    pub rotation: RotationPolicy,
}

/// Output format for the stdout layer. File output is always JSON.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
}

/// Rotation policy for file output.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RotationPolicy {
    #[default]
    Daily,
    Hourly,
    Never,
}

fn default_level() -> String {
    "info".to_string()
}

fn default_file_name() -> String {
    "plinth.log".to_string()
}

const fn default_true() -> bool {
    true
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: LogFormat::default(),
            dir: None,
            file_name: default_file_name(),
            enable_stdout: default_true(),
            rotation: RotationPolicy::default(),
        }
    }
}

impl LogSettings {
    /// Load logging settings from the files named by the configuration.
    ///
    /// The defaults file is merged first, the environment-specific file
    /// second; values from the latter win field by field. Both files must
    /// exist.
    pub fn load(config: &LogConfig) -> Result<Self> {
        for path in [&config.defaults, &config.file] {
            if !path.exists() {
                return Err(ConfigError::FileNotFound(path.clone()).into());
            }
        }

        Figment::new()
            .merge(Yaml::file(&config.defaults))
            .merge(Yaml::file(&config.file))
            .extract()
            .context("Failed to assemble logging settings")
    }
}
