// Integration tests for the application factory: the fixed middleware
// stack and the registration operations, driven through in-process
// requests.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use http_body_util::BodyExt;
use tower::ServiceExt;

use plinth::adapters::http::handlers::{self, ErrorResponse, HealthResponse};
use plinth::adapters::http::{AppBuilder, AppDescriptor, AppFactory};
use plinth::domain::errors::ServiceError;

/// A service with a couple of routes and no error handler overrides.
struct TestService;

impl AppFactory for TestService {
    fn descriptor(&self) -> AppDescriptor {
        AppDescriptor::new("test", "factory-under-test").description("integration fixture")
    }

    fn configure(&self, app: AppBuilder) -> anyhow::Result<AppBuilder> {
        let routes = Router::new()
            .route("/small", get(|| async { "ok" }))
            .route("/large", get(|| async { "x".repeat(4096) }))
            .route(
                "/missing",
                get(|| async {
                    Err::<&'static str, ServiceError>(ServiceError::NotFound("widget 42".into()))
                }),
            );

        Ok(app
            .register_api_router(routes)
            .register_api_router(handlers::health_router(self.descriptor())))
    }
}

/// Same routes, plus a custom handler for [`ServiceError`].
struct OverridingService;

impl AppFactory for OverridingService {
    fn descriptor(&self) -> AppDescriptor {
        AppDescriptor::new("test-override", "handler-override")
    }

    fn configure(&self, app: AppBuilder) -> anyhow::Result<AppBuilder> {
        let routes = Router::new().route(
            "/missing",
            get(|| async {
                Err::<&'static str, ServiceError>(ServiceError::NotFound("widget 42".into()))
            }),
        );

        Ok(app
            .register_api_router(routes)
            .register_error_handler(|err: ServiceError| -> Response {
                (
                    StatusCode::GONE,
                    Json(ErrorResponse::new("gone", err.to_string())),
                )
                    .into_response()
            }))
    }
}

async fn send(router: Router, request: Request<Body>) -> Response {
    router.oneshot(request).await.unwrap()
}

#[tokio::test]
async fn test_cors_headers_present_on_every_response() {
    let router = TestService.build().unwrap();

    let response = send(
        router,
        Request::builder()
            .method(Method::GET)
            .uri("/small")
            .header(header::ORIGIN, "http://example.com")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .map(|v| v.to_str().unwrap()),
        Some("*")
    );
    assert!(
        !response
            .headers()
            .contains_key(header::ACCESS_CONTROL_ALLOW_CREDENTIALS),
        "wildcard CORS must not allow credentials"
    );
}

#[tokio::test]
async fn test_preflight_allows_any_method_and_headers() {
    let router = TestService.build().unwrap();

    let response = send(
        router,
        Request::builder()
            .method(Method::OPTIONS)
            .uri("/small")
            .header(header::ORIGIN, "http://example.com")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "DELETE")
            .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "x-custom")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_METHODS)
            .map(|v| v.to_str().unwrap()),
        Some("*")
    );
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_HEADERS)
            .map(|v| v.to_str().unwrap()),
        Some("*")
    );
}

#[tokio::test]
async fn test_large_responses_are_gzip_compressed() {
    let router = TestService.build().unwrap();

    let response = send(
        router,
        Request::builder()
            .method(Method::GET)
            .uri("/large")
            .header(header::ACCEPT_ENCODING, "gzip")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::CONTENT_ENCODING)
            .map(|v| v.to_str().unwrap()),
        Some("gzip")
    );
}

#[tokio::test]
async fn test_small_responses_skip_compression() {
    let router = TestService.build().unwrap();

    let response = send(
        router,
        Request::builder()
            .method(Method::GET)
            .uri("/small")
            .header(header::ACCEPT_ENCODING, "gzip")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        !response.headers().contains_key(header::CONTENT_ENCODING),
        "bodies under the threshold must not be compressed"
    );
}

#[tokio::test]
async fn test_service_errors_map_to_error_response() {
    let router = TestService.build().unwrap();

    let response = send(
        router,
        Request::builder()
            .method(Method::GET)
            .uri("/missing")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: ErrorResponse = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body.id, "not_found");
    assert_eq!(body.message, "Not found: widget 42");
}

#[tokio::test]
async fn test_registered_error_handler_rewrites_responses() {
    let router = OverridingService.build().unwrap();

    let response = send(
        router,
        Request::builder()
            .method(Method::GET)
            .uri("/missing")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::GONE);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: ErrorResponse = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body.id, "gone");
    assert_eq!(body.message, "Not found: widget 42");
}

#[tokio::test]
async fn test_health_reports_descriptor() {
    let router = TestService.build().unwrap();

    let response = send(
        router,
        Request::builder()
            .method(Method::GET)
            .uri("/health")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: HealthResponse = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body.status, "ok");
    assert_eq!(body.uid, "test");
    assert_eq!(body.name, "factory-under-test");
    assert_eq!(body.description, "integration fixture");
}
