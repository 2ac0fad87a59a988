//! LLM Client — the single point of entry for all text-generation calls.
//!
//! ARCHITECTURAL RULE: no other module may call a provider API directly.
//! All generation goes through [`TextGenerator`], normally behind the
//! [`FallbackExecutor`](crate::executor::FallbackExecutor).
//!
//! Failures are classified at this boundary into [`GenerateError`] kinds so
//! that retry decisions never depend on matching substrings of
//! provider-specific error messages.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub mod prompts;

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const HTTP_TIMEOUT_SECS: u64 = 120;

/// A classified generation failure.
///
/// `RateLimited`, `CapacityExceeded` and `Timeout` are transient: the same
/// call may succeed against another provider. `Other` covers structural
/// failures (bad request, auth) that will not.
#[derive(Debug, Clone, Error)]
pub enum GenerateError {
    #[error("rate limited: {0}")]
    RateLimited(String),

    #[error("capacity exceeded: {0}")]
    CapacityExceeded(String),

    #[error("timed out: {0}")]
    Timeout(String),

    #[error("generation failed: {0}")]
    Other(String),
}

impl GenerateError {
    /// Whether trying the next provider of the same backing service is
    /// worthwhile.
    pub fn is_transient(&self) -> bool {
        !matches!(self, GenerateError::Other(_))
    }
}

/// The text-generation capability. One call, one prompt, one text response.
///
/// Carried as `Arc<dyn TextGenerator>` so tests can substitute a scripted
/// implementation.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(
        &self,
        model: &str,
        prompt: &str,
        system: &str,
        temperature: f32,
        max_tokens: u32,
    ) -> Result<String, GenerateError>;
}

#[derive(Debug, Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    system: &'a str,
    messages: Vec<AnthropicMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    content: Vec<ContentBlock>,
    usage: Usage,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    input_tokens: u32,
    output_tokens: u32,
}

impl AnthropicResponse {
    /// Extracts the text content from the first text block.
    fn text(&self) -> Option<&str> {
        self.content
            .iter()
            .find(|b| b.block_type == "text")
            .and_then(|b| b.text.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct AnthropicError {
    error: AnthropicErrorBody,
}

#[derive(Debug, Deserialize)]
struct AnthropicErrorBody {
    message: String,
}

/// Production [`TextGenerator`] over the Anthropic Messages API.
///
/// Model, temperature and token budget come from the caller per request —
/// provider preference lives in the executor's ordered list, not here.
#[derive(Clone)]
pub struct AnthropicClient {
    client: Client,
    api_key: String,
}

impl AnthropicClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(HTTP_TIMEOUT_SECS))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
        }
    }
}

#[async_trait]
impl TextGenerator for AnthropicClient {
    async fn generate(
        &self,
        model: &str,
        prompt: &str,
        system: &str,
        temperature: f32,
        max_tokens: u32,
    ) -> Result<String, GenerateError> {
        let request_body = AnthropicRequest {
            model,
            max_tokens,
            temperature,
            system,
            messages: vec![AnthropicMessage {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(ANTHROPIC_API_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GenerateError::Timeout(e.to_string())
                } else {
                    GenerateError::Other(e.to_string())
                }
            })?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<AnthropicError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(match status.as_u16() {
                429 => GenerateError::RateLimited(message),
                // 529 is the documented "overloaded" status; treat any other
                // 5xx as a capacity problem as well.
                code if code >= 500 => GenerateError::CapacityExceeded(message),
                _ => GenerateError::Other(format!("status {}: {message}", status.as_u16())),
            });
        }

        let parsed: AnthropicResponse = response
            .json()
            .await
            .map_err(|e| GenerateError::Other(format!("invalid response body: {e}")))?;

        debug!(
            model,
            input_tokens = parsed.usage.input_tokens,
            output_tokens = parsed.usage.output_tokens,
            "generation call succeeded"
        );

        parsed
            .text()
            .map(str::to_owned)
            .ok_or_else(|| GenerateError::Other("model returned empty content".to_string()))
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limited_is_transient() {
        assert!(GenerateError::RateLimited("429".to_string()).is_transient());
    }

    #[test]
    fn test_capacity_exceeded_is_transient() {
        assert!(GenerateError::CapacityExceeded("overloaded".to_string()).is_transient());
    }

    #[test]
    fn test_timeout_is_transient() {
        assert!(GenerateError::Timeout("deadline".to_string()).is_transient());
    }

    #[test]
    fn test_other_is_not_transient() {
        assert!(!GenerateError::Other("invalid api key".to_string()).is_transient());
    }
}
