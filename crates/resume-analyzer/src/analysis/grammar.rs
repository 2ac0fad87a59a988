//! Grammar and readability task.

use serde::Deserialize;
use tracing::warn;

use crate::analysis::{clamp_score, generate_struct, prompts};
use crate::executor::FallbackExecutor;
use crate::llm_client::prompts::SCORING_INSTRUCTION;
use crate::models::report::{GrammarAnalysis, ResultSource};
use crate::models::request::AnalysisRequest;

/// Sentences longer than this read poorly on a resume.
const LONG_SENTENCE_WORDS: usize = 30;

/// Filler phrasing that weakens bullets. Lowercase for matching.
const WEAK_PHRASES: &[&str] = &[
    "responsible for",
    "duties included",
    "worked on",
    "helped with",
    "was involved in",
];

#[derive(Debug, Deserialize)]
struct GrammarWire {
    #[serde(default)]
    score: f64,
    #[serde(default)]
    error_count: u32,
    #[serde(default)]
    issues: Vec<String>,
}

pub async fn analyze(executor: &FallbackExecutor, request: &AnalysisRequest) -> GrammarAnalysis {
    let prompt = prompts::GRAMMAR_PROMPT_TEMPLATE
        .replace("{resume_text}", &request.resume_text)
        .replace("{scoring_instruction}", SCORING_INSTRUCTION);
    match generate_struct::<GrammarWire>(executor, &prompt, prompts::GRAMMAR_SYSTEM).await {
        Ok(wire) => GrammarAnalysis {
            score: clamp_score(wire.score),
            error_count: wire.error_count,
            issues: wire.issues,
            source: ResultSource::Ai,
        },
        Err(e) => {
            warn!(error = %e, "grammar analysis degraded to heuristic");
            fallback(request)
        }
    }
}

/// Deterministic readability checks: over-long sentences, filler phrases,
/// doubled whitespace. Each finding costs a few points off a strong base.
pub fn fallback(request: &AnalysisRequest) -> GrammarAnalysis {
    let text = request.resume_text.as_str();
    let lower = text.to_lowercase();
    let mut issues = Vec::new();

    let long_sentences = text
        .split(['.', '!', '?'])
        .filter(|s| s.split_whitespace().count() > LONG_SENTENCE_WORDS)
        .count();
    if long_sentences > 0 {
        issues.push(format!(
            "{long_sentences} sentence(s) exceed {LONG_SENTENCE_WORDS} words; split them for readability"
        ));
    }

    for phrase in WEAK_PHRASES {
        if lower.contains(phrase) {
            issues.push(format!(
                "Weak phrasing \"{phrase}\"; lead with a concrete action verb instead"
            ));
        }
    }

    if text.contains("  ") {
        issues.push("Doubled spaces found; normalize whitespace".to_string());
    }

    let error_count = issues.len() as u32;
    let score = clamp_score(85.0 - 7.0 * f64::from(error_count));

    GrammarAnalysis {
        score,
        error_count,
        issues,
        source: ResultSource::Fallback,
    }
}
