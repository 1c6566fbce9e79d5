use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Root configuration for a plinth microservice.
///
/// Each field narrows the merged configuration mapping to one sublevel.
/// The value is immutable once loaded: the loader hands out an owned copy
/// and nothing in the crate mutates it afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AppConfig {
    /// Storage configuration.
    pub storage: StorageConfig,

    /// Logging configuration.
    pub log: LogConfig,

    /// API server configuration.
    pub api: ApiConfig,
}

/// Storage configuration sublevel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct StorageConfig {
    /// Filesystem storage configuration.
    pub fs: FileSystemConfig,
}

/// Filesystem storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct FileSystemConfig {
    /// Root directory for file storage.
    pub root: PathBuf,

    /// Named folders keyed by purpose, resolved by the deployment.
    #[serde(default)]
    pub folders: BTreeMap<String, PathBuf>,
}

impl FileSystemConfig {
    /// Look up a named folder.
    pub fn folder(&self, name: &str) -> Option<&Path> {
        self.folders.get(name).map(PathBuf::as_path)
    }
}

/// Logging configuration sublevel.
///
/// Names the YAML files holding the logging settings; see
/// [`crate::infrastructure::logging::LogSettings`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LogConfig {
    /// Environment-specific logging settings file.
    pub file: PathBuf,

    /// Default logging settings file.
    pub defaults: PathBuf,
}

/// API server configuration sublevel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ApiConfig {
    /// Host the webserver binds to.
    pub host: String,

    /// Port the webserver listens on.
    pub port: u16,
}
