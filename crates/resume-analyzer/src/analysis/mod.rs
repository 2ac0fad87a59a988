// Analysis tasks: keyword coverage, grammar, format/structure, quantified
// achievements, overall assessment, plus optimization suggestions.
// All LLM calls go through the fallback executor — no direct client calls here.
// Every task must produce a result; failures degrade to the task's heuristic.

pub mod assessment;
pub mod format;
pub mod grammar;
pub mod keyword;
pub mod prompts;
pub mod quantitative;
pub mod suggestions;

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::executor::{ExecutorError, FallbackExecutor};
use crate::sanitizer::{self, SanitizeError};

/// Why an AI attempt for a task was abandoned. Consumed inside the task
/// analyzers; never crosses the orchestrator boundary.
#[derive(Debug, Error)]
pub(crate) enum TaskError {
    #[error(transparent)]
    Exhausted(#[from] ExecutorError),

    #[error(transparent)]
    Malformed(#[from] SanitizeError),
}

/// One generation round trip: executor cascade, then sanitization into the
/// task's wire struct.
pub(crate) async fn generate_struct<T: DeserializeOwned>(
    executor: &FallbackExecutor,
    prompt: &str,
    system: &str,
) -> Result<T, TaskError> {
    let text = executor.generate(prompt, system).await?;
    Ok(sanitizer::extract_struct::<T>(&text)?)
}

/// Clamps a raw model-reported score into the 0–100 contract.
pub(crate) fn clamp_score(raw: f64) -> u8 {
    if raw.is_nan() {
        return 0;
    }
    raw.clamp(0.0, 100.0).round() as u8
}
