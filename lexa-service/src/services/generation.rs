//! Generation client: prompt construction plus the retried provider call.

use super::prompts;
use super::providers::{GenerationParams, ProviderError, TextProvider};
use crate::models::TranslationDirection;
use service_core::retry::{retry_with_policy, RetryConfig};
use std::sync::Arc;

/// Prefix for provider failures that are reported as result text.
pub const DEGRADED_PREFIX: &str = "Error calling Gemini API: ";

/// Text produced for a request. Degraded provider failures are carried as
/// ordinary text here unless strict mode is on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationResult {
    pub text: String,
}

#[derive(Clone)]
pub struct GenerationClient {
    provider: Arc<dyn TextProvider>,
    params: GenerationParams,
    retry: RetryConfig,
    strict_provider_errors: bool,
}

impl GenerationClient {
    pub fn new(provider: Arc<dyn TextProvider>, retry: RetryConfig) -> Self {
        Self {
            provider,
            params: GenerationParams::default(),
            retry,
            strict_provider_errors: false,
        }
    }

    pub fn with_params(mut self, params: GenerationParams) -> Self {
        self.params = params;
        self
    }

    /// Return provider-level failures as errors instead of result text.
    pub fn with_strict_provider_errors(mut self, strict: bool) -> Self {
        self.strict_provider_errors = strict;
        self
    }

    pub fn retry_config(&self) -> &RetryConfig {
        &self.retry
    }

    pub async fn translate(
        &self,
        text: &str,
        direction: TranslationDirection,
    ) -> Result<GenerationResult, ProviderError> {
        match direction {
            TranslationDirection::LegalToXml => self.legal_to_xml(text).await,
            TranslationDirection::XmlToLegal => self.xml_to_legal(text).await,
        }
    }

    pub async fn legal_to_xml(&self, legal_text: &str) -> Result<GenerationResult, ProviderError> {
        self.call_with_retry(&prompts::legal_to_xml(legal_text)).await
    }

    pub async fn xml_to_legal(&self, xml_text: &str) -> Result<GenerationResult, ProviderError> {
        self.call_with_retry(&prompts::xml_to_legal(xml_text)).await
    }

    pub async fn evaluate(
        &self,
        legal_text: &str,
        xml_text: &str,
    ) -> Result<GenerationResult, ProviderError> {
        self.call_with_retry(&prompts::evaluation(legal_text, xml_text))
            .await
    }

    /// Run the prompt under the retry policy. Only transport failures are
    /// retried; when the budget runs out the last transport error is returned.
    pub async fn call_with_retry(&self, prompt: &str) -> Result<GenerationResult, ProviderError> {
        retry_with_policy(
            &self.retry,
            "generate_content",
            ProviderError::is_transport,
            || self.attempt(prompt),
        )
        .await
    }

    async fn attempt(&self, prompt: &str) -> Result<GenerationResult, ProviderError> {
        match self.provider.generate(prompt, &self.params).await {
            Ok(response) => {
                tracing::debug!(
                    provider = self.provider.name(),
                    input_tokens = response.input_tokens,
                    output_tokens = response.output_tokens,
                    finish_reason = ?response.finish_reason,
                    "Generation completed"
                );
                Ok(GenerationResult {
                    text: response.text,
                })
            }
            Err(e) if e.is_transport() || self.strict_provider_errors => Err(e),
            Err(e) => {
                tracing::warn!(
                    provider = self.provider.name(),
                    error = %e,
                    "Provider error returned as result text"
                );
                Ok(GenerationResult {
                    text: format!("{}{}", DEGRADED_PREFIX, e),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::providers::mock::MockTextProvider;
    use std::time::Duration;
    use tokio::time::Instant;

    fn production_retry() -> RetryConfig {
        RetryConfig::exponential(3, Duration::from_secs(5), Duration::from_secs(30))
    }

    fn client(provider: Arc<MockTextProvider>) -> GenerationClient {
        GenerationClient::new(provider, production_retry())
    }

    #[tokio::test(start_paused = true)]
    async fn transport_failure_exhausts_three_attempts() {
        let provider = Arc::new(MockTextProvider::failing(ProviderError::Network(
            "connection refused".into(),
        )));
        let start = Instant::now();

        let result = client(provider.clone()).call_with_retry("prompt").await;

        assert_eq!(
            result.unwrap_err(),
            ProviderError::Network("connection refused".into())
        );
        assert_eq!(provider.calls(), 3);
        assert_eq!(start.elapsed(), Duration::from_secs(15));
    }

    #[tokio::test(start_paused = true)]
    async fn second_attempt_success_is_returned_after_one_delay() {
        let provider = Arc::new(MockTextProvider::scripted(
            vec![
                Err(ProviderError::Network("timeout".into())),
                Ok("<section>2</section>".into()),
            ],
            Ok("unused".into()),
        ));
        let start = Instant::now();

        let result = client(provider.clone()).call_with_retry("prompt").await;

        assert_eq!(result.unwrap().text, "<section>2</section>");
        assert_eq!(provider.calls(), 2);
        assert_eq!(start.elapsed(), Duration::from_secs(5));
    }

    #[tokio::test(start_paused = true)]
    async fn provider_error_becomes_degraded_text_without_retry() {
        let provider = Arc::new(MockTextProvider::failing(ProviderError::Api(
            "Gemini API error 400 Bad Request: API key not valid".into(),
        )));

        let result = client(provider.clone()).call_with_retry("prompt").await.unwrap();

        assert_eq!(
            result.text,
            "Error calling Gemini API: API error: Gemini API error 400 Bad Request: API key not valid"
        );
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn strict_mode_surfaces_provider_error() {
        let provider = Arc::new(MockTextProvider::failing(ProviderError::RateLimited));

        let result = client(provider.clone())
            .with_strict_provider_errors(true)
            .call_with_retry("prompt")
            .await;

        assert_eq!(result.unwrap_err(), ProviderError::RateLimited);
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn operations_send_their_own_prompts() {
        let provider = Arc::new(MockTextProvider::always("ok"));
        let client = client(provider.clone());

        client
            .translate("Section 1.", TranslationDirection::LegalToXml)
            .await
            .unwrap();
        client
            .translate("<section/>", TranslationDirection::XmlToLegal)
            .await
            .unwrap();
        client.evaluate("Section 1.", "<section/>").await.unwrap();

        let prompts = provider.prompts().await;
        assert_eq!(prompts[0], prompts::legal_to_xml("Section 1."));
        assert_eq!(prompts[1], prompts::xml_to_legal("<section/>"));
        assert_eq!(prompts[2], prompts::evaluation("Section 1.", "<section/>"));
    }
}
