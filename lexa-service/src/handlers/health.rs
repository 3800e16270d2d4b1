use axum::Json;
use serde::Serialize;

pub const SERVICE_NAME: &str = "Lexa Legal XML Translator";

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<&'static str>,
}

/// GET /
pub async fn root() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        message: "Lexa API is running",
        service: None,
        version: None,
    })
}

/// GET /health
///
/// Liveness only; the generation provider is not contacted.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        message: "Lexa API is running",
        service: Some(SERVICE_NAME),
        version: Some(env!("CARGO_PKG_VERSION")),
    })
}
