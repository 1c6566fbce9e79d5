//! Logging infrastructure
//!
//! Structured logging using tracing and tracing-subscriber:
//! - JSON or pretty stdout output
//! - Optional non-blocking file output with rotation
//! - Settings loaded from the YAML files named by the `log` sublevel

mod config;
mod logger;

pub use config::{LogFormat, LogSettings, RotationPolicy};
pub use logger::{init, LogGuard};
