//! Layered configuration loading with custom YAML tag resolution.

pub mod interpolate;
pub mod loader;

pub use interpolate::TagResolver;
pub use loader::{ConfigError, ConfigLoader};
