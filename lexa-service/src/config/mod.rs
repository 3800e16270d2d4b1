use secrecy::Secret;
use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use service_core::retry::RetryConfig;
use std::env;
use std::time::Duration;

/// Model used when `GEMINI_MODEL` is not set.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

/// Public Gemini REST endpoint.
pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

const DEFAULT_GEMINI_TIMEOUT_SECS: u64 = 120;
const DEFAULT_RETRY_MAX_ATTEMPTS: u32 = 3;
const DEFAULT_RETRY_INITIAL_BACKOFF_SECS: u64 = 5;
const DEFAULT_RETRY_MAX_BACKOFF_SECS: u64 = 30;

#[derive(Debug, Clone, Deserialize)]
pub struct LexaConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub gemini: GeminiSettings,
    pub retry: RetrySettings,
    /// Report provider-level failures as HTTP 502 instead of returning the
    /// error text as a successful result.
    pub strict_provider_errors: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeminiSettings {
    pub api_key: Secret<String>,
    pub model: String,
    pub api_base: String,
    pub timeout_secs: u64,
    pub temperature: Option<f32>,
    pub max_output_tokens: Option<i32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RetrySettings {
    pub max_attempts: u32,
    pub initial_backoff_secs: u64,
    pub max_backoff_secs: u64,
}

impl RetrySettings {
    pub fn to_retry_config(&self) -> RetryConfig {
        RetryConfig::exponential(
            self.max_attempts,
            Duration::from_secs(self.initial_backoff_secs),
            Duration::from_secs(self.max_backoff_secs),
        )
    }
}

impl LexaConfig {
    /// Load from `.env`, the process environment and the common config sources.
    pub fn load() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;
        Self::from_lookup(common, |key| env::var(key).ok())
    }

    /// Build the service settings from an arbitrary key lookup.
    pub fn from_lookup<F>(common: core_config::Config, lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("GEMINI_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                AppError::ConfigError(anyhow::anyhow!(
                    "GEMINI_API_KEY environment variable required. Check your .env file."
                ))
            })?;

        Ok(LexaConfig {
            common,
            gemini: GeminiSettings {
                api_key: Secret::new(api_key),
                model: lookup("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
                api_base: lookup("GEMINI_API_BASE")
                    .unwrap_or_else(|| DEFAULT_GEMINI_API_BASE.to_string()),
                timeout_secs: parse_or(&lookup, "GEMINI_TIMEOUT_SECS", DEFAULT_GEMINI_TIMEOUT_SECS)?,
                temperature: parse_opt(&lookup, "GEMINI_TEMPERATURE")?,
                max_output_tokens: parse_opt(&lookup, "GEMINI_MAX_OUTPUT_TOKENS")?,
            },
            retry: RetrySettings {
                max_attempts: parse_or(
                    &lookup,
                    "LEXA_RETRY_MAX_ATTEMPTS",
                    DEFAULT_RETRY_MAX_ATTEMPTS,
                )?,
                initial_backoff_secs: parse_or(
                    &lookup,
                    "LEXA_RETRY_INITIAL_BACKOFF_SECS",
                    DEFAULT_RETRY_INITIAL_BACKOFF_SECS,
                )?,
                max_backoff_secs: parse_or(
                    &lookup,
                    "LEXA_RETRY_MAX_BACKOFF_SECS",
                    DEFAULT_RETRY_MAX_BACKOFF_SECS,
                )?,
            },
            strict_provider_errors: parse_or(&lookup, "LEXA_STRICT_PROVIDER_ERRORS", false)?,
        })
    }
}

fn parse_opt<F, T>(lookup: &F, key: &str) -> Result<Option<T>, AppError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map(Some).map_err(|e| {
            AppError::ConfigError(anyhow::anyhow!("{} has an invalid value '{}': {}", key, raw, e))
        }),
        None => Ok(None),
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, AppError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    Ok(parse_opt(lookup, key)?.unwrap_or(default))
}
