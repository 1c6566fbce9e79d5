//! Application factory.
//!
//! Implementations wire their routes and error handlers in
//! [`AppFactory::configure`]; the provided [`AppFactory::build`] then
//! attaches the fixed middleware stack (permissive CORS, gzip compression,
//! request tracing) regardless of what `configure` registered.

use anyhow::Result;
use axum::middleware::map_response;
use axum::response::Response;
use axum::Router;
use chrono::{DateTime, Utc};
use tower_http::compression::predicate::SizeAbove;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Responses smaller than this many bytes are served uncompressed.
const COMPRESSION_MIN_BYTES: u16 = 1000;

/// Identity of one application instance.
///
/// Created once at process start and kept for the process lifetime.
#[derive(Debug, Clone)]
pub struct AppDescriptor {
    /// Unique identifier for the application.
    pub uid: String,
    /// Human-readable application name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Startup timestamp.
    pub startup_timestamp: DateTime<Utc>,
}

impl AppDescriptor {
    /// Create a descriptor with an empty description and the current time
    /// as startup timestamp.
    pub fn new(uid: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            name: name.into(),
            description: String::new(),
            startup_timestamp: Utc::now(),
        }
    }

    /// Set the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the startup timestamp.
    #[must_use]
    pub fn started_at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.startup_timestamp = timestamp;
        self
    }

    /// Title line used in logs and the health payload.
    pub fn title(&self) -> String {
        format!("Microservice [{}] - {}", self.uid, self.name)
    }
}

/// Accumulates routing during [`AppFactory::configure`].
#[derive(Default)]
pub struct AppBuilder {
    router: Router,
}

impl AppBuilder {
    pub fn new() -> Self {
        Self {
            router: Router::new(),
        }
    }

    /// Mount a feature router onto the application.
    ///
    /// Pass-through to [`Router::merge`]; no validation or rewriting.
    #[must_use]
    pub fn register_api_router(mut self, router: Router) -> Self {
        self.router = self.router.merge(router);
        self
    }

    /// Register a response handler for errors of type `E`.
    ///
    /// Route handlers surface failures by recording the error value in the
    /// response extensions (the convention implemented for
    /// [`ServiceError`](crate::domain::errors::ServiceError) in
    /// [`handlers`](super::handlers)); the registered handler rewrites any
    /// response carrying an `E`. Responses without one pass through
    /// untouched. Delegates to [`axum::middleware::map_response`].
    #[must_use]
    pub fn register_error_handler<E, F>(mut self, handler: F) -> Self
    where
        E: Clone + Send + Sync + 'static,
        F: Fn(E) -> Response + Clone + Send + Sync + 'static,
    {
        self.router = self
            .router
            .layer(map_response(move |mut response: Response| {
                let handler = handler.clone();
                async move {
                    match response.extensions_mut().remove::<E>() {
                        Some(err) => handler(err),
                        None => response,
                    }
                }
            }));
        self
    }

    /// Attach the fixed middleware stack and finish the router.
    fn finish(self) -> Router {
        self.router
            .layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            )
            .layer(CompressionLayer::new().compress_when(SizeAbove::new(COMPRESSION_MIN_BYTES)))
            .layer(TraceLayer::new_for_http())
    }
}

/// Abstract application factory.
///
/// The configure hook is the only thing implementations supply; middleware
/// attachment and the initialization log line are shared bootstrap
/// behavior.
pub trait AppFactory {
    /// Identity of the application being built.
    fn descriptor(&self) -> AppDescriptor;

    /// Wire routers and error handlers for this application.
    fn configure(&self, app: AppBuilder) -> Result<AppBuilder>;

    /// Build the application router.
    ///
    /// Invokes [`configure`](Self::configure), then unconditionally
    /// attaches the CORS layer (any origin, no credentials, any method or
    /// header) and the gzip compression layer (1000-byte minimum size).
    fn build(&self) -> Result<Router> {
        let descriptor = self.descriptor();
        let app = self.configure(AppBuilder::new())?;
        let router = app.finish();
        tracing::info!(
            "{} successfully initialized at {}",
            descriptor.title(),
            descriptor.startup_timestamp
        );
        Ok(router)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_defaults() {
        let descriptor = AppDescriptor::new("core", "plinth-core");
        assert_eq!(descriptor.uid, "core");
        assert_eq!(descriptor.name, "plinth-core");
        assert!(descriptor.description.is_empty());
    }

    #[test]
    fn test_descriptor_builders() {
        let started = Utc::now();
        let descriptor = AppDescriptor::new("core", "plinth-core")
            .description("the core service")
            .started_at(started);
        assert_eq!(descriptor.description, "the core service");
        assert_eq!(descriptor.startup_timestamp, started);
    }

    #[test]
    fn test_descriptor_title() {
        let descriptor = AppDescriptor::new("billing", "invoice-api");
        assert_eq!(descriptor.title(), "Microservice [billing] - invoice-api");
    }
}
