//! Generic exception handlers.
//!
//! Common error-to-response mappings shared by every service built on the
//! factory live here. A domain-specific error belongs to the owning
//! service when it needs response fields beyond id and message, or a
//! different HTTP mapping; such services define their own error type and
//! install it with
//! [`AppBuilder::register_error_handler`](super::AppBuilder::register_error_handler).

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::factory::AppDescriptor;
use crate::domain::errors::ServiceError;

/// Wire shape for all error bodies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Stable error identifier.
    pub id: String,
    /// Human-readable message.
    pub message: String,
}

impl ErrorResponse {
    pub fn new(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            message: message.into(),
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ServiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = ErrorResponse::new(self.id(), self.to_string());
        let mut response = (status, Json(body)).into_response();
        // Registered error handlers look the original error up here.
        response.extensions_mut().insert(self);
        response
    }
}

/// Payload reported by the health endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub uid: String,
    pub name: String,
    pub description: String,
    pub started_at: DateTime<Utc>,
}

/// Liveness endpoint reporting the application identity.
async fn health(State(descriptor): State<AppDescriptor>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        uid: descriptor.uid,
        name: descriptor.name,
        description: descriptor.description,
        started_at: descriptor.startup_timestamp,
    })
}

/// Router exposing `/health` for the given application.
pub fn health_router(descriptor: AppDescriptor) -> Router {
    Router::new()
        .route("/health", get(health))
        .with_state(descriptor)
}
