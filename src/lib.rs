//! Plinth - application bootstrap for HTTP microservices
//!
//! Plinth wires the unexciting parts of a microservice: layered YAML
//! configuration with environment-variable interpolation, structured
//! logging, and an application factory that surrounds service-supplied
//! routing with a fixed middleware stack (permissive CORS, gzip
//! compression, request tracing).
//!
//! # Architecture
//!
//! - **Domain layer** (`domain`): configuration model and shared error taxonomy
//! - **Infrastructure layer** (`infrastructure`): configuration loading and logging
//! - **Adapter layer** (`adapters`): the HTTP factory, generic handlers and server
//!
//! # Example
//!
//! ```ignore
//! use plinth::adapters::http::{AppBuilder, AppDescriptor, AppFactory, HttpServer};
//! use plinth::infrastructure::config::ConfigLoader;
//!
//! struct Service;
//!
//! impl AppFactory for Service {
//!     fn descriptor(&self) -> AppDescriptor {
//!         AppDescriptor::new("core", "my-service")
//!     }
//!
//!     fn configure(&self, app: AppBuilder) -> anyhow::Result<AppBuilder> {
//!         Ok(app)
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ConfigLoader::load()?;
//!     let router = Service.build()?;
//!     HttpServer::new(&config.api, router).serve().await
//! }
//! ```

pub mod adapters;
pub mod domain;
pub mod infrastructure;

// Re-export commonly used types for convenience
pub use adapters::http::{AppBuilder, AppDescriptor, AppFactory, HttpServer};
pub use domain::errors::{DomainResult, ServiceError};
pub use domain::models::{ApiConfig, AppConfig, FileSystemConfig, LogConfig, StorageConfig};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use infrastructure::logging::{LogGuard, LogSettings};
