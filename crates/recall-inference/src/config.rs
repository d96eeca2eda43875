//! Gateway client configuration.

use std::time::Duration;

use recall_core::{defaults, Error, Result};

/// Configuration for the OpenRouter-compatible gateway backend.
#[derive(Debug, Clone)]
pub struct OpenRouterConfig {
    /// Base URL for the API endpoint.
    pub base_url: String,
    /// API key for authentication.
    pub api_key: String,
    /// Model slug to request.
    pub model: String,
    /// Sampling temperature, within [0.0, 1.0].
    pub temperature: f32,
    /// Completion token budget; must be positive.
    pub max_tokens: u32,
    /// Per-attempt request timeout in seconds.
    pub timeout_seconds: u64,
    /// Total attempts per call (1 initial + retries).
    pub max_attempts: u32,
    /// Base backoff delay; doubles per retry.
    pub retry_base_delay: Duration,
    /// HTTP-Referer header for OpenRouter attribution (optional).
    pub http_referer: Option<String>,
    /// X-Title header for app name on OpenRouter (optional).
    pub x_title: Option<String>,
}

impl Default for OpenRouterConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::GATEWAY_BASE_URL.to_string(),
            api_key: String::new(),
            model: defaults::GATEWAY_MODEL.to_string(),
            temperature: defaults::DEFAULT_TEMPERATURE,
            max_tokens: defaults::DEFAULT_MAX_TOKENS,
            timeout_seconds: defaults::GATEWAY_TIMEOUT_SECS,
            max_attempts: defaults::GATEWAY_MAX_ATTEMPTS,
            retry_base_delay: Duration::from_secs(defaults::RETRY_BASE_DELAY_SECS),
            http_referer: None,
            x_title: None,
        }
    }
}

impl OpenRouterConfig {
    /// Create from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("OPENROUTER_BASE_URL")
                .unwrap_or_else(|_| defaults::GATEWAY_BASE_URL.to_string()),
            api_key: std::env::var("OPENROUTER_API_KEY").unwrap_or_default(),
            model: std::env::var("OPENROUTER_MODEL")
                .unwrap_or_else(|_| defaults::GATEWAY_MODEL.to_string()),
            temperature: std::env::var("OPENROUTER_TEMPERATURE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults::DEFAULT_TEMPERATURE),
            max_tokens: std::env::var("OPENROUTER_MAX_TOKENS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults::DEFAULT_MAX_TOKENS),
            timeout_seconds: std::env::var("OPENROUTER_TIMEOUT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults::GATEWAY_TIMEOUT_SECS),
            max_attempts: defaults::GATEWAY_MAX_ATTEMPTS,
            retry_base_delay: Duration::from_secs(defaults::RETRY_BASE_DELAY_SECS),
            http_referer: std::env::var("OPENROUTER_HTTP_REFERER").ok(),
            x_title: std::env::var("OPENROUTER_X_TITLE").ok(),
        }
    }

    /// Validate construction-time invariants.
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(Error::Config("Gateway API key is not set".to_string()));
        }
        if !(0.0..=1.0).contains(&self.temperature) {
            return Err(Error::Config(format!(
                "Temperature must be within [0.0, 1.0] ({} given)",
                self.temperature
            )));
        }
        if self.max_tokens == 0 {
            return Err(Error::Config("Token budget must be positive".to_string()));
        }
        if self.max_attempts == 0 {
            return Err(Error::Config("At least one attempt is required".to_string()));
        }
        Ok(())
    }
}
