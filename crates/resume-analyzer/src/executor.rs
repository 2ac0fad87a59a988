//! Provider Fallback Executor — tries an ordered list of providers until one
//! answers.
//!
//! The ordering encodes preference (fastest/cheapest first). Transient
//! failures (rate limit, capacity, timeout) advance to the next provider;
//! a structural failure additionally skips the remaining providers of the
//! same backing service, since repeating a doomed request against a sibling
//! model cannot succeed.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, warn};

use crate::llm_client::{GenerateError, TextGenerator};

/// One entry in the ordered provider preference list.
///
/// Immutable after construction. `service` names the backing vendor family
/// and drives the same-service skip rule on structural failures.
#[derive(Debug, Clone)]
pub struct ProviderSpec {
    pub model: String,
    pub service: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl ProviderSpec {
    pub fn new(model: &str, service: &str, temperature: f32, max_tokens: u32) -> Self {
        Self {
            model: model.to_string(),
            service: service.to_string(),
            temperature,
            max_tokens,
        }
    }
}

/// Raised only when every configured provider has failed.
///
/// Never surfaces to callers of the analyzer: task analyzers convert it into
/// a heuristic fallback result.
#[derive(Debug, Error)]
pub enum ExecutorError {
    #[error("all providers exhausted after {attempts} attempts: {last_error}")]
    Exhausted { attempts: usize, last_error: String },
}

/// Runs one generation request across the provider preference list.
pub struct FallbackExecutor {
    generator: Arc<dyn TextGenerator>,
    providers: Vec<ProviderSpec>,
    call_timeout: Duration,
    attempt_delay: Duration,
}

impl FallbackExecutor {
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        providers: Vec<ProviderSpec>,
        call_timeout: Duration,
        attempt_delay: Duration,
    ) -> Self {
        Self {
            generator,
            providers,
            call_timeout,
            attempt_delay,
        }
    }

    /// Tries providers strictly in order and returns the first successful
    /// response text. Attempts within one call are sequential, never raced.
    pub async fn generate(&self, prompt: &str, system: &str) -> Result<String, ExecutorError> {
        let mut attempts = 0;
        let mut last_error = "no providers configured".to_string();
        let mut idx = 0;

        while idx < self.providers.len() {
            let provider = &self.providers[idx];

            if attempts > 0 {
                // Fixed pause so a degraded provider is not hammered.
                tokio::time::sleep(self.attempt_delay).await;
            }
            attempts += 1;

            let outcome = tokio::time::timeout(
                self.call_timeout,
                self.generator.generate(
                    &provider.model,
                    prompt,
                    system,
                    provider.temperature,
                    provider.max_tokens,
                ),
            )
            .await;

            let err = match outcome {
                Ok(Ok(text)) => return Ok(text),
                Ok(Err(e)) => e,
                Err(_) => GenerateError::Timeout(format!(
                    "no response from {} within {}ms",
                    provider.model,
                    self.call_timeout.as_millis()
                )),
            };

            warn!(
                model = %provider.model,
                service = %provider.service,
                error = %err,
                "provider attempt failed"
            );
            last_error = err.to_string();

            let failed_service = provider.service.clone();
            idx += 1;

            if !err.is_transient() {
                while idx < self.providers.len() && self.providers[idx].service == failed_service {
                    debug!(
                        model = %self.providers[idx].model,
                        "skipping same-service provider after structural failure"
                    );
                    idx += 1;
                }
            }
        }

        Err(ExecutorError::Exhausted {
            attempts,
            last_error,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::ScriptedGenerator;

    fn provider(model: &str, service: &str) -> ProviderSpec {
        ProviderSpec::new(model, service, 0.2, 1024)
    }

    fn executor(generator: ScriptedGenerator, providers: Vec<ProviderSpec>) -> FallbackExecutor {
        FallbackExecutor::new(
            Arc::new(generator),
            providers,
            Duration::from_secs(5),
            Duration::ZERO,
        )
    }

    #[tokio::test]
    async fn test_first_provider_success_stops_cascade() {
        let gen = ScriptedGenerator::new().on_model("fast", Ok("hello".to_string()));
        let calls = Arc::new(gen);
        let exec = FallbackExecutor::new(
            calls.clone(),
            vec![provider("fast", "anthropic"), provider("slow", "anthropic")],
            Duration::from_secs(5),
            Duration::ZERO,
        );

        let text = exec.generate("p", "s").await.unwrap();
        assert_eq!(text, "hello");
        assert_eq!(calls.models_called(), vec!["fast"]);
    }

    #[tokio::test]
    async fn test_rate_limit_cascades_in_order() {
        let gen = ScriptedGenerator::new()
            .on_model("a", Err(GenerateError::RateLimited("429".to_string())))
            .on_model("b", Err(GenerateError::CapacityExceeded("529".to_string())))
            .on_model("c", Ok("from c".to_string()));
        let gen = Arc::new(gen);
        let exec = FallbackExecutor::new(
            gen.clone(),
            vec![
                provider("a", "anthropic"),
                provider("b", "anthropic"),
                provider("c", "anthropic"),
            ],
            Duration::from_secs(5),
            Duration::ZERO,
        );

        let text = exec.generate("p", "s").await.unwrap();
        assert_eq!(text, "from c");
        assert_eq!(gen.models_called(), vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_structural_failure_skips_same_service() {
        let gen = ScriptedGenerator::new()
            .on_model("a1", Err(GenerateError::Other("bad request".to_string())))
            .on_model("b1", Ok("from b1".to_string()));
        let gen = Arc::new(gen);
        let exec = FallbackExecutor::new(
            gen.clone(),
            vec![
                provider("a1", "vendor-a"),
                provider("a2", "vendor-a"),
                provider("b1", "vendor-b"),
            ],
            Duration::from_secs(5),
            Duration::ZERO,
        );

        let text = exec.generate("p", "s").await.unwrap();
        assert_eq!(text, "from b1");
        // a2 must never be attempted: same service as the structural failure.
        assert_eq!(gen.models_called(), vec!["a1", "b1"]);
    }

    #[tokio::test]
    async fn test_transient_failure_does_not_skip_same_service() {
        let gen = ScriptedGenerator::new()
            .on_model("a1", Err(GenerateError::RateLimited("429".to_string())))
            .on_model("a2", Ok("from a2".to_string()));
        let gen = Arc::new(gen);
        let exec = FallbackExecutor::new(
            gen.clone(),
            vec![provider("a1", "vendor-a"), provider("a2", "vendor-a")],
            Duration::from_secs(5),
            Duration::ZERO,
        );

        let text = exec.generate("p", "s").await.unwrap();
        assert_eq!(text, "from a2");
        assert_eq!(gen.models_called(), vec!["a1", "a2"]);
    }

    #[tokio::test]
    async fn test_exhaustion_carries_last_error() {
        let exec = executor(
            ScriptedGenerator::new()
                .on_model("a", Err(GenerateError::RateLimited("limit a".to_string())))
                .on_model("b", Err(GenerateError::CapacityExceeded("no capacity".to_string()))),
            vec![provider("a", "anthropic"), provider("b", "anthropic")],
        );

        let err = exec.generate("p", "s").await.unwrap_err();
        let ExecutorError::Exhausted {
            attempts,
            last_error,
        } = err;
        assert_eq!(attempts, 2);
        assert!(last_error.contains("no capacity"), "was: {last_error}");
    }

    #[tokio::test]
    async fn test_empty_provider_list_is_exhausted_immediately() {
        let exec = executor(ScriptedGenerator::new(), vec![]);
        let ExecutorError::Exhausted { attempts, .. } = exec.generate("p", "s").await.unwrap_err();
        assert_eq!(attempts, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_hung_provider_times_out_and_cascades() {
        use async_trait::async_trait;
        use crate::llm_client::TextGenerator;

        struct HangsOnFirst;

        #[async_trait]
        impl TextGenerator for HangsOnFirst {
            async fn generate(
                &self,
                model: &str,
                _prompt: &str,
                _system: &str,
                _temperature: f32,
                _max_tokens: u32,
            ) -> Result<String, GenerateError> {
                if model == "hangs" {
                    std::future::pending::<()>().await;
                    unreachable!()
                }
                Ok("recovered".to_string())
            }
        }

        let exec = FallbackExecutor::new(
            Arc::new(HangsOnFirst),
            vec![provider("hangs", "anthropic"), provider("ok", "anthropic")],
            Duration::from_millis(100),
            Duration::from_millis(200),
        );

        let text = exec.generate("p", "s").await.unwrap();
        assert_eq!(text, "recovered");
    }
}
