//! HTTP application factory, generic handlers and server wrapper.

pub mod factory;
pub mod handlers;
pub mod server;

pub use factory::{AppBuilder, AppDescriptor, AppFactory};
pub use server::HttpServer;
