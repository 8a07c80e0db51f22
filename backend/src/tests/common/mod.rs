// Common test utilities and helpers

use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, Response, header},
};
use tower::ServiceExt;

use crate::services::LanguageService;
use crate::{AppState, build_router};

/// Router backed by the default configuration
pub fn create_test_router() -> Router {
    build_router(Arc::new(AppState::with_service(LanguageService::with_tracing())))
}

/// Send a request through a fresh router
pub async fn send(request: Request<Body>) -> Response<Body> {
    create_test_router().oneshot(request).await.expect("Router call failed")
}

pub fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).expect("Failed to build request")
}

pub fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("Failed to build request")
}

/// Read the response body as JSON
pub async fn json_body(response: Response<Body>) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    serde_json::from_slice(&bytes).expect("Body is not JSON")
}
