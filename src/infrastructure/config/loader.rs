use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use figment::providers::{Env, Serialized};
use figment::Figment;
use thiserror::Error;

use super::interpolate::TagResolver;
use crate::domain::models::config::AppConfig;

/// Environment variable naming the deployment root.
pub const PROJECT_DIR_VAR: &str = "PROJECT_DIR";

/// Environment variable naming the active environment.
pub const ENV_VAR: &str = "ENV";

/// Prefix for configuration overrides taken from the environment.
pub const ENV_OVERRIDE_PREFIX: &str = "PLINTH_";

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Required environment variable not set: {0}")]
    MissingEnvVar(String),

    #[error("Configuration file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Unsupported configuration tag: {0}")]
    UnsupportedTag(String),

    #[error("!path expects a string scalar")]
    InvalidPathPayload,

    #[error("!joinPath expects a sequence of path segments")]
    InvalidJoinPayload,

    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for the current process environment.
    ///
    /// File locations are derived from `PROJECT_DIR` and `ENV`:
    /// `$PROJECT_DIR/config/defaults.yml` merged with
    /// `$PROJECT_DIR/config/app.$ENV.yml`. Both variables and both files
    /// are required. This is one-shot startup configuration; failure is
    /// fatal to the caller and there are no retry semantics.
    ///
    /// Precedence (lowest to highest):
    /// 1. defaults.yml
    /// 2. app.$ENV.yml
    /// 3. Environment variables (`PLINTH_` prefix, `__` separates levels)
    pub fn load() -> Result<AppConfig> {
        let project_dir = require_env(PROJECT_DIR_VAR)?;
        let environment = require_env(ENV_VAR)?;

        let conf_dir = Path::new(&project_dir).join("config");
        let defaults = conf_dir.join("defaults.yml");
        let overrides = conf_dir.join(format!("app.{environment}.yml"));
        Self::load_from(&defaults, &overrides)
    }

    /// Load configuration from explicit defaults and override files.
    pub fn load_from(defaults: &Path, overrides: &Path) -> Result<AppConfig> {
        let resolver = TagResolver::new();
        let base = read_resolved(&resolver, defaults)?;
        let over = read_resolved(&resolver, overrides)?;

        let config: AppConfig = Figment::new()
            .merge(Serialized::defaults(base))
            .merge(Serialized::defaults(over))
            .merge(Env::prefixed(ENV_OVERRIDE_PREFIX).split("__"))
            .extract()
            .context("Failed to assemble configuration from merged sources")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(config: &AppConfig) -> Result<(), ConfigError> {
        if config.api.host.is_empty() {
            return Err(ConfigError::ValidationFailed(
                "api.host cannot be empty".to_string(),
            ));
        }

        if config.api.port == 0 {
            return Err(ConfigError::ValidationFailed(
                "api.port cannot be 0".to_string(),
            ));
        }

        if config.storage.fs.root.as_os_str().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "storage.fs.root cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

/// Read one YAML file and resolve its custom tags.
fn read_resolved(resolver: &TagResolver, path: &Path) -> Result<serde_yaml::Value, ConfigError> {
    let raw = std::fs::read_to_string(path)
        .map_err(|_| ConfigError::FileNotFound(path.to_path_buf()))?;
    let value: serde_yaml::Value = serde_yaml::from_str(&raw).map_err(|source| {
        ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        }
    })?;
    resolver.resolve(value)
}

fn require_env(name: &str) -> Result<String, ConfigError> {
    env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}
