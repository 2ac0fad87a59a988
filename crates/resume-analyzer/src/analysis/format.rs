//! Format and section-structure task. Produces both the general formatting
//! score and the structure sub-score consumed by the ATS formula.

use serde::Deserialize;
use tracing::warn;

use crate::analysis::{clamp_score, generate_struct, prompts};
use crate::executor::FallbackExecutor;
use crate::llm_client::prompts::SCORING_INSTRUCTION;
use crate::models::report::{FormatAnalysis, ResultSource};
use crate::models::request::AnalysisRequest;

/// Canonical resume section headers, lowercase. Order matters for display.
const CANONICAL_SECTIONS: &[&str] = &[
    "summary",
    "experience",
    "education",
    "skills",
    "projects",
    "certifications",
];

/// Sections an ATS expects at minimum.
const CORE_SECTIONS: &[&str] = &["experience", "education", "skills"];

const IDEAL_WORDS_MIN: usize = 250;
const IDEAL_WORDS_MAX: usize = 900;

#[derive(Debug, Deserialize)]
struct FormatWire {
    #[serde(default)]
    score: f64,
    #[serde(default)]
    structure_score: f64,
    #[serde(default)]
    ats_compatible: Option<bool>,
    #[serde(default)]
    sections_found: Vec<String>,
    #[serde(default)]
    issues: Vec<String>,
}

pub async fn analyze(executor: &FallbackExecutor, request: &AnalysisRequest) -> FormatAnalysis {
    let prompt = prompts::FORMAT_PROMPT_TEMPLATE
        .replace("{resume_text}", &request.resume_text)
        .replace("{scoring_instruction}", SCORING_INSTRUCTION);
    match generate_struct::<FormatWire>(executor, &prompt, prompts::FORMAT_SYSTEM).await {
        Ok(wire) => {
            let score = clamp_score(wire.score);
            FormatAnalysis {
                score,
                structure_score: clamp_score(wire.structure_score),
                ats_compatible: wire.ats_compatible.unwrap_or(score >= 70),
                sections_found: wire.sections_found,
                issues: wire.issues,
                source: ResultSource::Ai,
            }
        }
        Err(e) => {
            warn!(error = %e, "format analysis degraded to heuristic");
            fallback(request)
        }
    }
}

/// Deterministic structure checks: canonical headers, bullet markers and
/// length discipline.
pub fn fallback(request: &AnalysisRequest) -> FormatAnalysis {
    let lower = request.resume_text.to_lowercase();

    let sections_found: Vec<String> = CANONICAL_SECTIONS
        .iter()
        .filter(|s| lower.contains(*s))
        .map(|s| s.to_string())
        .collect();

    let has_bullets = request
        .resume_text
        .lines()
        .any(|l| matches!(l.trim_start().chars().next(), Some('-' | '*' | '•')));

    let words = request.word_count();
    let length_ok = (IDEAL_WORDS_MIN..=IDEAL_WORDS_MAX).contains(&words);

    let mut issues = Vec::new();
    for core in CORE_SECTIONS {
        if !sections_found.iter().any(|s| s == core) {
            issues.push(format!("Missing a dedicated \"{core}\" section"));
        }
    }
    if !has_bullets {
        issues.push("No bullet points found; recruiters scan bullets, not paragraphs".to_string());
    }
    if !length_ok {
        issues.push(format!(
            "Resume length ({words} words) is outside the typical {IDEAL_WORDS_MIN}-{IDEAL_WORDS_MAX} word range"
        ));
    }

    let header_points = 10 * sections_found.len().min(4) as u32;
    let mut score = 40 + header_points;
    if has_bullets {
        score += 10;
    }
    if length_ok {
        score += 10;
    }

    let structure_score =
        clamp_score(sections_found.len() as f64 / CANONICAL_SECTIONS.len() as f64 * 100.0);

    let core_count = CORE_SECTIONS
        .iter()
        .copied()
        .filter(|core| sections_found.iter().any(|s| s == core))
        .count();

    FormatAnalysis {
        score: clamp_score(f64::from(score)),
        structure_score,
        ats_compatible: core_count == CORE_SECTIONS.len() && has_bullets,
        sections_found,
        issues,
        source: ResultSource::Fallback,
    }
}
