//! Translation and evaluation endpoints.

use axum::{extract::State, Json};
use service_core::error::AppError;
use validator::Validate;

use crate::models::{EvaluationRequest, GenerationResponse, TranslationRequest};
use crate::services::providers::ProviderError;
use crate::startup::AppState;

/// POST /translate
#[tracing::instrument(
    skip(state, request),
    fields(direction = %request.direction, text_len = request.text.len())
)]
pub async fn translate(
    State(state): State<AppState>,
    Json(request): Json<TranslationRequest>,
) -> Result<Json<GenerationResponse>, AppError> {
    request.validate()?;
    let direction = request
        .direction()
        .map_err(|e| AppError::BadRequest(anyhow::Error::new(e)))?;

    let result = state
        .generator
        .translate(&request.text, direction)
        .await
        .map_err(|e| downstream_error("Translation", e))?;

    Ok(Json(GenerationResponse {
        result: result.text,
    }))
}

/// POST /evaluate
#[tracing::instrument(
    skip(state, request),
    fields(legal_len = request.legal_text.len(), xml_len = request.xml_text.len())
)]
pub async fn evaluate(
    State(state): State<AppState>,
    Json(request): Json<EvaluationRequest>,
) -> Result<Json<GenerationResponse>, AppError> {
    request.validate()?;

    let result = state
        .generator
        .evaluate(&request.legal_text, &request.xml_text)
        .await
        .map_err(|e| downstream_error("Evaluation", e))?;

    Ok(Json(GenerationResponse {
        result: result.text,
    }))
}

/// Exhausted transport retries are a service failure (500); provider-level
/// errors only reach here in strict mode and are reported as 502.
fn downstream_error(operation: &str, err: ProviderError) -> AppError {
    tracing::error!(operation, error = %err, "Generation failed");

    if err.is_transport() {
        AppError::InternalError(anyhow::anyhow!("{} failed: {}", operation, err))
    } else {
        AppError::BadGateway(format!("{} failed: {}", operation, err))
    }
}
