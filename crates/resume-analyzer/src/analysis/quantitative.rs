//! Quantified-achievement task — measurable impact beats adjectives.

use serde::Deserialize;
use tracing::warn;

use crate::analysis::{clamp_score, generate_struct, prompts};
use crate::executor::FallbackExecutor;
use crate::llm_client::prompts::SCORING_INSTRUCTION;
use crate::models::report::{QuantitativeAnalysis, ResultSource};
use crate::models::request::AnalysisRequest;

/// Cap on extracted achievement lines so the report stays readable.
const MAX_ACHIEVEMENTS: usize = 10;

#[derive(Debug, Deserialize)]
struct QuantitativeWire {
    #[serde(default)]
    score: f64,
    #[serde(default)]
    achievements_found: Vec<String>,
    #[serde(default)]
    suggested_additions: Vec<String>,
}

pub async fn analyze(
    executor: &FallbackExecutor,
    request: &AnalysisRequest,
) -> QuantitativeAnalysis {
    let prompt = prompts::QUANTITATIVE_PROMPT_TEMPLATE
        .replace("{resume_text}", &request.resume_text)
        .replace("{scoring_instruction}", SCORING_INSTRUCTION);
    match generate_struct::<QuantitativeWire>(executor, &prompt, prompts::QUANTITATIVE_SYSTEM).await
    {
        Ok(wire) => QuantitativeAnalysis {
            score: clamp_score(wire.score),
            achievements_found: wire.achievements_found,
            suggested_additions: wire.suggested_additions,
            source: ResultSource::Ai,
        },
        Err(e) => {
            warn!(error = %e, "quantitative analysis degraded to heuristic");
            fallback(request)
        }
    }
}

/// Deterministic proxy for quantified impact: the share of words carrying a
/// digit, `%` or currency marker, plus the lines those words live on.
pub fn fallback(request: &AnalysisRequest) -> QuantitativeAnalysis {
    let total_words = request.word_count();
    let numeric_words = request
        .resume_text
        .split_whitespace()
        .filter(|w| is_quantifier(w))
        .count();

    let achievements_found: Vec<String> = request
        .resume_text
        .lines()
        .map(str::trim)
        .filter(|l| l.split_whitespace().count() >= 4)
        .filter(|l| l.split_whitespace().any(is_quantifier))
        .take(MAX_ACHIEVEMENTS)
        .map(|l| l.trim_start_matches(['-', '*', '•']).trim().to_string())
        .collect();

    let score = if total_words == 0 {
        0
    } else {
        // ~7% numeric density is an excellent resume; scale toward that.
        let density = numeric_words as f64 / total_words as f64;
        clamp_score((density * 1200.0).min(90.0))
    };

    let mut suggested_additions = Vec::new();
    if achievements_found.len() < 3 {
        suggested_additions
            .push("Add percentage or absolute improvements to your strongest bullets".to_string());
        suggested_additions
            .push("Quantify scale: team size, request volume, budget or user count".to_string());
    }

    QuantitativeAnalysis {
        score,
        achievements_found,
        suggested_additions,
        source: ResultSource::Fallback,
    }
}

fn is_quantifier(word: &str) -> bool {
    word.chars().any(|c| c.is_ascii_digit()) || word.contains('%') || word.contains('$')
}
