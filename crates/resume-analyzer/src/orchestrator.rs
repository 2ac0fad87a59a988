//! Analysis Orchestrator — runs the five analysis tasks concurrently and
//! folds their results into one report.
//!
//! Flow: validate input → run task analyzers concurrently → aggregate
//! composite scores → generate suggestions → assemble report.
//!
//! Each task is independently resilient: provider exhaustion, malformed
//! output and deadline overruns all degrade that one task to its heuristic.
//! The join therefore cannot fail; only the empty-input check can reject a
//! call.

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use tracing::{info, warn};

use crate::analysis::{assessment, format, grammar, keyword, quantitative, suggestions};
use crate::config::AnalyzerConfig;
use crate::errors::AnalysisError;
use crate::executor::FallbackExecutor;
use crate::llm_client::{AnthropicClient, TextGenerator};
use crate::models::report::{AnalysisReport, ReportMetadata};
use crate::models::request::AnalysisRequest;
use crate::scoring;

/// Bumped whenever scoring weights or task semantics change, so stored
/// reports can be told apart.
pub const ANALYSIS_VERSION: &str = "2.1";

/// The resume analysis engine. Cheap to clone and safe to share across
/// tasks: all state is read-only configuration behind an `Arc`.
#[derive(Clone)]
pub struct ResumeAnalyzer {
    executor: Arc<FallbackExecutor>,
    task_deadline: Duration,
}

impl ResumeAnalyzer {
    pub fn new(generator: Arc<dyn TextGenerator>, config: &AnalyzerConfig) -> Self {
        let executor = FallbackExecutor::new(
            generator,
            config.providers.clone(),
            config.call_timeout,
            config.attempt_delay,
        );
        Self {
            executor: Arc::new(executor),
            task_deadline: config.task_deadline,
        }
    }

    /// Wires up the production Anthropic client from configuration.
    pub fn from_config(config: &AnalyzerConfig) -> Self {
        let client = AnthropicClient::new(config.anthropic_api_key.clone());
        Self::new(Arc::new(client), config)
    }

    /// Analyzes a resume against a target job. The sole public operation.
    ///
    /// Succeeds for every non-empty input: degraded tasks are reported with
    /// `source: "fallback"` rather than failing the call.
    pub async fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisReport, AnalysisError> {
        if request.resume_text.trim().is_empty() {
            return Err(AnalysisError::EmptyInput);
        }

        let started = Instant::now();
        info!(
            job_title = %request.target_job.title,
            words = request.word_count(),
            "starting resume analysis"
        );

        let executor = &self.executor;
        let (keyword, grammar, format, quantitative, assessment) = tokio::join!(
            with_deadline(
                self.task_deadline,
                keyword::analyze(executor, &request),
                || keyword::fallback(&request),
            ),
            with_deadline(
                self.task_deadline,
                grammar::analyze(executor, &request),
                || grammar::fallback(&request),
            ),
            with_deadline(
                self.task_deadline,
                format::analyze(executor, &request),
                || format::fallback(&request),
            ),
            with_deadline(
                self.task_deadline,
                quantitative::analyze(executor, &request),
                || quantitative::fallback(&request),
            ),
            with_deadline(
                self.task_deadline,
                assessment::analyze(executor, &request),
                || assessment::fallback(&request),
            ),
        );

        let overall_score =
            scoring::overall_score(keyword.score, grammar.score, format.score, quantitative.score);
        let ats_score = scoring::ats_score(keyword.score, format.score, format.structure_score);

        let suggestions = with_deadline(
            self.task_deadline,
            suggestions::generate(executor, &request, &keyword, &grammar, &format, &quantitative),
            suggestions::generic,
        )
        .await;

        let processing_time_ms = started.elapsed().as_millis() as u64;
        info!(
            overall_score,
            ats_score, processing_time_ms, "resume analysis complete"
        );

        Ok(AnalysisReport {
            overall_score,
            ats_score,
            strengths: assessment.strengths.clone(),
            weaknesses: assessment.weaknesses.clone(),
            keyword,
            grammar,
            format,
            quantitative,
            assessment,
            suggestions,
            processing_time_ms,
            metadata: ReportMetadata {
                word_count: request.word_count(),
                target_job_title: request.target_job.title.clone(),
                analysis_version: ANALYSIS_VERSION.to_string(),
                generated_at: Utc::now(),
            },
        })
    }
}

/// Bounds a task future by the per-task deadline. An overrunning task is
/// abandoned and replaced by its heuristic result, so cancellation never
/// leaves the report incomplete.
async fn with_deadline<T, F, Fb>(deadline: Duration, task: F, fallback: Fb) -> T
where
    F: Future<Output = T>,
    Fb: FnOnce() -> T,
{
    match tokio::time::timeout(deadline, task).await {
        Ok(result) => result,
        Err(_) => {
            warn!("analysis task exceeded its deadline, using heuristic result");
            fallback()
        }
    }
}
