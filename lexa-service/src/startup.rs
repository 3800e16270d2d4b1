//! Application startup and lifecycle management.

use crate::config::LexaConfig;
use crate::handlers;
use crate::services::providers::gemini::{GeminiConfig, GeminiTextProvider};
use crate::services::providers::{GenerationParams, TextProvider};
use crate::services::GenerationClient;
use axum::{
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{request_id_middleware, REQUEST_ID_HEADER};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub generator: GenerationClient,
}

impl AppState {
    pub fn new(generator: GenerationClient) -> Self {
        Self { generator }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        .route("/translate", post(handlers::translate))
        .route("/evaluate", post(handlers::evaluate))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

/// Construct the Gemini-backed generation client described by `config`.
pub fn generation_client(config: &LexaConfig) -> Result<GenerationClient, AppError> {
    let provider = GeminiTextProvider::new(GeminiConfig {
        api_key: config.gemini.api_key.clone(),
        model: config.gemini.model.clone(),
        api_base: config.gemini.api_base.clone(),
        timeout: Duration::from_secs(config.gemini.timeout_secs),
    })
    .map_err(|e| AppError::ConfigError(anyhow::Error::new(e)))?;

    tracing::info!(model = %provider.model(), "Initialized Gemini text provider");

    let provider: Arc<dyn TextProvider> = Arc::new(provider);
    Ok(GenerationClient::new(provider, config.retry.to_retry_config())
        .with_params(GenerationParams {
            temperature: config.gemini.temperature,
            max_tokens: config.gemini.max_output_tokens,
        })
        .with_strict_provider_errors(config.strict_provider_errors))
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application with the given configuration.
    pub async fn build(config: LexaConfig) -> Result<Self, AppError> {
        let generator = generation_client(&config)?;
        Self::build_with_generator(&config, generator).await
    }

    /// Build around an already constructed generation client.
    pub async fn build_with_generator(
        config: &LexaConfig,
        generator: GenerationClient,
    ) -> Result<Self, AppError> {
        let retry = generator.retry_config();
        tracing::info!(
            max_attempts = retry.max_attempts,
            initial_backoff_ms = retry.initial_backoff.as_millis() as u64,
            max_backoff_ms = retry.max_backoff.as_millis() as u64,
            strict_provider_errors = config.strict_provider_errors,
            "Generation retry policy configured"
        );

        // Port 0 = random port for testing
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Lexa service listening on port {}", port);

        Ok(Self {
            port,
            listener,
            state: AppState::new(generator),
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Serve until `shutdown` resolves.
    pub async fn run_until_stopped<S>(self, shutdown: S) -> std::io::Result<()>
    where
        S: Future<Output = ()> + Send + 'static,
    {
        let router = build_router(self.state);

        axum::serve(self.listener, router)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| {
                tracing::error!("HTTP server error: {}", e);
                std::io::Error::other(format!("HTTP server error: {}", e))
            })
    }
}
