//! Domain models.

pub mod config;

pub use config::{ApiConfig, AppConfig, FileSystemConfig, LogConfig, StorageConfig};
