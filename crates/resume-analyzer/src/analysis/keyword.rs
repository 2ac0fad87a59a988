//! Keyword coverage task — how much of the target job's vocabulary the
//! resume demonstrates.

use serde::Deserialize;
use tracing::warn;

use crate::analysis::{clamp_score, generate_struct, prompts};
use crate::executor::FallbackExecutor;
use crate::llm_client::prompts::SCORING_INSTRUCTION;
use crate::models::report::{KeywordAnalysis, ResultSource};
use crate::models::request::AnalysisRequest;

#[derive(Debug, Deserialize)]
struct KeywordWire {
    #[serde(default)]
    score: f64,
    #[serde(default)]
    matched_keywords: Vec<String>,
    #[serde(default)]
    missing_keywords: Vec<String>,
    #[serde(default)]
    suggestions: Vec<String>,
}

pub async fn analyze(executor: &FallbackExecutor, request: &AnalysisRequest) -> KeywordAnalysis {
    let prompt = build_prompt(request);
    match generate_struct::<KeywordWire>(executor, &prompt, prompts::KEYWORD_SYSTEM).await {
        Ok(wire) => KeywordAnalysis {
            score: clamp_score(wire.score),
            matched_keywords: wire.matched_keywords,
            missing_keywords: wire.missing_keywords,
            suggestions: wire.suggestions,
            source: ResultSource::Ai,
        },
        Err(e) => {
            warn!(error = %e, "keyword analysis degraded to heuristic");
            fallback(request)
        }
    }
}

fn build_prompt(request: &AnalysisRequest) -> String {
    let keywords = request.target_job.keyword_list();
    let keyword_line = if keywords.is_empty() {
        "(none provided; infer them from the job title)".to_string()
    } else {
        keywords.join(", ")
    };
    prompts::KEYWORD_PROMPT_TEMPLATE
        .replace("{job_title}", &request.target_job.title)
        .replace("{keywords}", &keyword_line)
        .replace("{resume_text}", &request.resume_text)
        .replace("{scoring_instruction}", SCORING_INSTRUCTION)
}

/// Deterministic keyword coverage: case-insensitive substring match of each
/// target keyword against the resume. O(n) over input, never fails.
pub fn fallback(request: &AnalysisRequest) -> KeywordAnalysis {
    let keywords = effective_keywords(&request.target_job);
    let resume_lower = request.resume_text.to_lowercase();

    let mut matched = Vec::new();
    let mut missing = Vec::new();
    for keyword in keywords {
        if resume_lower.contains(&keyword.to_lowercase()) {
            matched.push(keyword);
        } else {
            missing.push(keyword);
        }
    }

    let total = matched.len() + missing.len();
    let score = if total == 0 {
        // Nothing to measure against; neutral rather than punitive.
        50
    } else {
        clamp_score(matched.len() as f64 / total as f64 * 100.0)
    };

    let mut suggestions = Vec::new();
    if !missing.is_empty() {
        suggestions.push(format!(
            "Incorporate missing keywords into your experience bullets: {}",
            missing.join(", ")
        ));
    }

    KeywordAnalysis {
        score,
        matched_keywords: matched,
        missing_keywords: missing,
        suggestions,
        source: ResultSource::Fallback,
    }
}

/// The explicit keyword list when present, otherwise meaningful words from
/// the job title so the heuristic always has something to measure.
fn effective_keywords(job: &crate::models::request::TargetJob) -> Vec<String> {
    let explicit = job.keyword_list();
    if !explicit.is_empty() {
        return explicit;
    }
    job.title
        .split_whitespace()
        .filter(|w| w.chars().count() > 2)
        .map(str::to_string)
        .collect()
}
