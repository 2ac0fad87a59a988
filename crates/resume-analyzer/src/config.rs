use std::time::Duration;

use anyhow::{Context, Result};

use crate::executor::ProviderSpec;

/// Analyzer configuration loaded from environment variables.
/// Read once at construction; immutable for the process lifetime.
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    pub anthropic_api_key: String,
    /// Upper bound on a single provider attempt.
    pub call_timeout: Duration,
    /// Fixed pause between attempts within one generation request.
    pub attempt_delay: Duration,
    /// Deadline per analysis task; an overrunning task degrades to its
    /// heuristic instead of blocking the report.
    pub task_deadline: Duration,
    /// Ordered provider preference list, fastest/cheapest first.
    pub providers: Vec<ProviderSpec>,
}

impl AnalyzerConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(AnalyzerConfig {
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            call_timeout: env_millis("ANALYZER_CALL_TIMEOUT_MS", 30_000)?,
            attempt_delay: env_millis("ANALYZER_ATTEMPT_DELAY_MS", 200)?,
            task_deadline: env_millis("ANALYZER_TASK_DEADLINE_MS", 90_000)?,
            providers: default_providers(),
        })
    }
}

/// The default provider cascade. Haiku answers most analysis calls well
/// under a second of model time; Sonnet picks up when Haiku is limited.
pub fn default_providers() -> Vec<ProviderSpec> {
    vec![
        ProviderSpec::new("claude-haiku-4-5", "anthropic", 0.2, 1024),
        ProviderSpec::new("claude-sonnet-4-5", "anthropic", 0.2, 2048),
    ]
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_millis(key: &str, default_ms: u64) -> Result<Duration> {
    let ms = match std::env::var(key) {
        Ok(raw) => raw
            .parse::<u64>()
            .with_context(|| format!("{key} must be a duration in milliseconds"))?,
        Err(_) => default_ms,
    };
    Ok(Duration::from_millis(ms))
}
