//! Plinth entry point.
//!
//! Boots the core microservice: configuration, logging, application
//! factory, HTTP server.

use anyhow::{Context, Result};

use plinth::adapters::http::{handlers, AppBuilder, AppDescriptor, AppFactory, HttpServer};
use plinth::infrastructure::config::ConfigLoader;
use plinth::infrastructure::logging::{self, LogSettings};

const APP_UID: &str = "core";
const APP_NAME: &str = "plinth-core";

/// The core service: health endpoint plus the generic handlers.
struct CoreService {
    descriptor: AppDescriptor,
}

impl AppFactory for CoreService {
    fn descriptor(&self) -> AppDescriptor {
        self.descriptor.clone()
    }

    fn configure(&self, app: AppBuilder) -> Result<AppBuilder> {
        Ok(app.register_api_router(handlers::health_router(self.descriptor.clone())))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = ConfigLoader::load()?;

    let settings = LogSettings::load(&config.log)?;
    let _guard = logging::init(&settings)?;

    std::fs::create_dir_all(&config.storage.fs.root).with_context(|| {
        format!(
            "Failed to create storage root {}",
            config.storage.fs.root.display()
        )
    })?;

    let service = CoreService {
        descriptor: AppDescriptor::new(APP_UID, APP_NAME)
            .description("Core plinth microservice"),
    };
    let router = service.build()?;

    HttpServer::new(&config.api, router)
        .serve_with_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", err);
    }
}
