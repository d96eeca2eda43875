//! OpenRouter-compatible gateway backend.
//!
//! Owns all communication with the LLM gateway: request construction,
//! retrying transient failures, and handing the raw completion content to
//! the defensive parser. Stateless apart from configuration; a single
//! instance is safely shared across concurrent generation runs.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, info, warn};

use recall_core::{
    validate_generation_input, CandidateFlashcard, CardGenerator, Error, Result,
};

use crate::config::OpenRouterConfig;
use crate::parse::parse_flashcards;
use crate::prompt::{build_user_prompt, response_schema, SYSTEM_PROMPT};
use crate::sanitize::sanitize_source_text;
use crate::types::{
    ChatCompletionRequest, ChatCompletionResponse, ChatMessage, GatewayErrorResponse,
    ResponseFormat,
};

/// OpenRouter-compatible generation backend.
pub struct OpenRouterBackend {
    client: Client,
    config: OpenRouterConfig,
}

impl OpenRouterBackend {
    /// Create a new backend with the given configuration.
    ///
    /// Fails with `Error::Config` when the configuration is invalid.
    pub fn new(config: OpenRouterConfig) -> Result<Self> {
        config.validate()?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        info!(
            subsystem = "inference",
            component = "openrouter",
            model = %config.model,
            base_url = %config.base_url,
            "Initializing gateway backend"
        );

        Ok(Self { client, config })
    }

    /// Create from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(OpenRouterConfig::from_env())
    }

    /// Get the current configuration.
    pub fn config(&self) -> &OpenRouterConfig {
        &self.config
    }

    /// Build an authenticated POST to the chat completions endpoint.
    fn build_request(&self) -> reqwest::RequestBuilder {
        let url = format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        );
        let mut req = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.config.api_key));

        if let Some(ref referer) = self.config.http_referer {
            req = req.header("HTTP-Referer", referer);
        }
        if let Some(ref title) = self.config.x_title {
            req = req.header("X-Title", title);
        }

        req.header("Content-Type", "application/json")
    }

    /// Send the request, retrying 5xx and network/timeout failures with
    /// exponential backoff. 4xx responses fail immediately.
    async fn call_with_retry(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse> {
        let mut attempt: u32 = 1;
        loop {
            let started = Instant::now();
            let outcome = self.build_request().json(request).send().await;

            match outcome {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        debug!(
                            subsystem = "inference",
                            component = "openrouter",
                            op = "generate",
                            attempt = attempt,
                            duration_ms = started.elapsed().as_millis() as u64,
                            "Gateway call succeeded"
                        );
                        return response.json::<ChatCompletionResponse>().await.map_err(|e| {
                            Error::Parse {
                                raw: format!("malformed completion body: {}", e),
                            }
                        });
                    }

                    let body = response.text().await.unwrap_or_default();
                    if status.is_server_error() && attempt < self.config.max_attempts {
                        let delay = self.backoff_delay(attempt);
                        warn!(
                            subsystem = "inference",
                            component = "openrouter",
                            attempt = attempt,
                            status_code = status.as_u16(),
                            retry_in_ms = delay.as_millis() as u64,
                            "Gateway returned server error; retrying"
                        );
                        tokio::time::sleep(delay).await;
                        attempt += 1;
                        continue;
                    }

                    return Err(gateway_error(status, body));
                }
                Err(e) => {
                    let transient = e.is_timeout() || e.is_connect();
                    if transient && attempt < self.config.max_attempts {
                        let delay = self.backoff_delay(attempt);
                        warn!(
                            subsystem = "inference",
                            component = "openrouter",
                            attempt = attempt,
                            error = %e,
                            retry_in_ms = delay.as_millis() as u64,
                            "Gateway request failed; retrying"
                        );
                        tokio::time::sleep(delay).await;
                        attempt += 1;
                        continue;
                    }
                    return Err(Error::Request(e.to_string()));
                }
            }
        }
    }

    /// Backoff before the next attempt: base, 2x base, 4x base, ...
    fn backoff_delay(&self, completed_attempt: u32) -> Duration {
        self.config.retry_base_delay * (1u32 << (completed_attempt - 1).min(8))
    }
}

/// Map a non-success HTTP response to the typed gateway error, logging the
/// optional upstream message.
fn gateway_error(status: StatusCode, body: String) -> Error {
    if let Ok(parsed) = serde_json::from_str::<GatewayErrorResponse>(&body) {
        if let Some(message) = parsed.error.and_then(|e| e.message) {
            warn!(
                subsystem = "inference",
                component = "openrouter",
                status_code = status.as_u16(),
                upstream_message = %message,
                "Gateway error body"
            );
        }
    }
    Error::Gateway {
        status: status.as_u16(),
        body,
    }
}

#[async_trait]
impl CardGenerator for OpenRouterBackend {
    async fn generate(&self, text: &str, max_cards: u32) -> Result<Vec<CandidateFlashcard>> {
        // Bounds are checked before any network traffic.
        validate_generation_input(text, max_cards)?;

        let sanitized = sanitize_source_text(text);
        let user_prompt = build_user_prompt(&sanitized, max_cards);

        debug!(
            subsystem = "inference",
            component = "openrouter",
            op = "generate",
            prompt_len = user_prompt.chars().count(),
            card_count = max_cards,
            "Requesting flashcard generation"
        );

        let request = ChatCompletionRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: user_prompt,
                },
            ],
            temperature: Some(self.config.temperature),
            max_tokens: Some(self.config.max_tokens),
            response_format: Some(ResponseFormat::json_schema(
                "flashcard_batch",
                response_schema(max_cards),
            )),
        };

        let response = self.call_with_retry(&request).await?;

        let content = response
            .choices
            .first()
            .map(|choice| choice.message.content.clone())
            .unwrap_or_default();
        if content.trim().is_empty() {
            return Err(Error::Parse {
                raw: "empty completion content".to_string(),
            });
        }

        let candidates = parse_flashcards(&content, max_cards)?;
        info!(
            subsystem = "inference",
            component = "openrouter",
            op = "generate",
            card_count = candidates.len(),
            response_len = content.chars().count(),
            "Generated flashcard candidates"
        );
        Ok(candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend_with(config: OpenRouterConfig) -> OpenRouterBackend {
        OpenRouterBackend::new(config).unwrap()
    }

    fn valid_config() -> OpenRouterConfig {
        OpenRouterConfig {
            api_key: "test-key".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = OpenRouterConfig::default(); // empty api key
        assert!(OpenRouterBackend::new(config).is_err());
    }

    #[test]
    fn test_backoff_doubles() {
        let mut config = valid_config();
        config.retry_base_delay = Duration::from_secs(2);
        let backend = backend_with(config);
        assert_eq!(backend.backoff_delay(1), Duration::from_secs(2));
        assert_eq!(backend.backoff_delay(2), Duration::from_secs(4));
    }

    #[tokio::test]
    async fn test_generate_rejects_short_text_without_network() {
        // base_url points nowhere; a network attempt would error differently.
        let mut config = valid_config();
        config.base_url = "http://127.0.0.1:1".to_string();
        let backend = backend_with(config);

        let err = backend.generate("too short", 5).await.unwrap_err();
        assert_eq!(err.code(), "invalid_input");
    }

    #[tokio::test]
    async fn test_generate_rejects_bad_max_cards_without_network() {
        let mut config = valid_config();
        config.base_url = "http://127.0.0.1:1".to_string();
        let backend = backend_with(config);

        let err = backend.generate(&"x".repeat(2000), 0).await.unwrap_err();
        assert_eq!(err.code(), "invalid_input");
        let err = backend.generate(&"x".repeat(2000), 51).await.unwrap_err();
        assert_eq!(err.code(), "invalid_input");
    }
}
