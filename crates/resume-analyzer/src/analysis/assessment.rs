//! Overall strengths-and-weaknesses assessment task.

use serde::Deserialize;
use tracing::warn;

use crate::analysis::{clamp_score, generate_struct, prompts};
use crate::executor::FallbackExecutor;
use crate::llm_client::prompts::SCORING_INSTRUCTION;
use crate::models::report::{AssessmentAnalysis, ResultSource};
use crate::models::request::AnalysisRequest;

#[derive(Debug, Deserialize)]
struct AssessmentWire {
    #[serde(default)]
    score: f64,
    #[serde(default)]
    strengths: Vec<String>,
    #[serde(default)]
    weaknesses: Vec<String>,
}

pub async fn analyze(
    executor: &FallbackExecutor,
    request: &AnalysisRequest,
) -> AssessmentAnalysis {
    let prompt = prompts::ASSESSMENT_PROMPT_TEMPLATE
        .replace("{job_title}", &request.target_job.title)
        .replace("{resume_text}", &request.resume_text)
        .replace("{scoring_instruction}", SCORING_INSTRUCTION);
    match generate_struct::<AssessmentWire>(executor, &prompt, prompts::ASSESSMENT_SYSTEM).await {
        Ok(wire) => AssessmentAnalysis {
            score: clamp_score(wire.score),
            strengths: wire.strengths,
            weaknesses: wire.weaknesses,
            source: ResultSource::Ai,
        },
        Err(e) => {
            warn!(error = %e, "assessment degraded to heuristic");
            fallback(request)
        }
    }
}

/// Deterministic assessment from cheap signals: length, quantification,
/// keyword overlap. Both lists are always non-empty so downstream rendering
/// never special-cases.
pub fn fallback(request: &AnalysisRequest) -> AssessmentAnalysis {
    let mut strengths = Vec::new();
    let mut weaknesses = Vec::new();

    let words = request.word_count();
    if (250..=900).contains(&words) {
        strengths.push("Resume length sits in the range recruiters actually read".to_string());
    } else if words > 0 {
        weaknesses.push(format!(
            "Length ({words} words) is outside the typical one-to-two-page range"
        ));
    }

    if request
        .resume_text
        .split_whitespace()
        .any(|w| w.chars().any(|c| c.is_ascii_digit()))
    {
        strengths.push("Includes measurable, numbers-backed results".to_string());
    } else {
        weaknesses.push("Few quantified outcomes; impact is asserted, not shown".to_string());
    }

    let resume_lower = request.resume_text.to_lowercase();
    let keywords = request.target_job.keyword_list();
    if !keywords.is_empty() {
        let matched = keywords
            .iter()
            .filter(|k| resume_lower.contains(&k.to_lowercase()))
            .count();
        if matched * 2 >= keywords.len() {
            strengths.push("Covers most of the target role's stated keywords".to_string());
        } else {
            weaknesses.push("Misses over half of the target role's stated keywords".to_string());
        }
    }

    if strengths.is_empty() {
        strengths.push("Readable professional narrative".to_string());
    }
    if weaknesses.is_empty() {
        weaknesses.push("Could tailor content more tightly to the target role".to_string());
    }

    let score = clamp_score(50.0 + 10.0 * strengths.len() as f64 - 8.0 * weaknesses.len() as f64);

    AssessmentAnalysis {
        score,
        strengths,
        weaknesses,
        source: ResultSource::Fallback,
    }
}
