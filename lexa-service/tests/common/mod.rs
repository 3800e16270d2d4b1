//! Test helpers for lexa-service integration tests.
//!
//! Routers are built around `MockTextProvider`, so no Gemini key or network
//! access is needed.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, Response},
    Router,
};
use http_body_util::BodyExt;
use lexa_service::services::providers::mock::MockTextProvider;
use lexa_service::services::GenerationClient;
use lexa_service::{build_router, AppState};
use service_core::retry::RetryConfig;
use std::sync::Arc;
use std::time::Duration;

/// The production policy: 3 attempts, 5s doubling, 30s cap.
pub fn production_retry() -> RetryConfig {
    RetryConfig::exponential(3, Duration::from_secs(5), Duration::from_secs(30))
}

pub fn generator(provider: Arc<MockTextProvider>) -> GenerationClient {
    GenerationClient::new(provider, production_retry())
}

pub fn app(provider: Arc<MockTextProvider>) -> Router {
    build_router(AppState::new(generator(provider)))
}

pub fn strict_app(provider: Arc<MockTextProvider>) -> Router {
    build_router(AppState::new(
        generator(provider).with_strict_provider_errors(true),
    ))
}

pub fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
