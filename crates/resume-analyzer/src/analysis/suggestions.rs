//! Optimization suggestions — the one generation call that runs after the
//! task analyses, referencing all four sub-scores. Its fallback is a fixed
//! pair of generic suggestions so the list is never empty.

use serde::Deserialize;
use tracing::warn;
use uuid::Uuid;

use crate::analysis::{generate_struct, prompts};
use crate::executor::FallbackExecutor;
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::models::report::{
    FormatAnalysis, GrammarAnalysis, KeywordAnalysis, OptimizationSuggestion,
    QuantitativeAnalysis,
};
use crate::models::request::AnalysisRequest;

const DEFAULT_PRIORITY: u8 = 3;
const DEFAULT_SCORE_DELTA: u8 = 5;

#[derive(Debug, Deserialize)]
struct SuggestionWire {
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    impact: Option<String>,
    #[serde(default)]
    actionable: Option<String>,
    #[serde(default)]
    priority: Option<f64>,
    #[serde(default)]
    estimated_score_delta: Option<f64>,
}

impl SuggestionWire {
    fn into_suggestion(self) -> OptimizationSuggestion {
        OptimizationSuggestion {
            id: Uuid::new_v4(),
            kind: self.kind.unwrap_or_else(|| "content".to_string()),
            title: self.title.unwrap_or_else(|| "Improve resume content".to_string()),
            description: self.description.unwrap_or_default(),
            impact: self.impact.unwrap_or_else(|| "medium".to_string()),
            actionable: self.actionable.unwrap_or_default(),
            priority: self
                .priority
                .map(|p| p.clamp(1.0, 5.0).round() as u8)
                .unwrap_or(DEFAULT_PRIORITY),
            estimated_score_delta: self
                .estimated_score_delta
                .map(|d| d.clamp(0.0, 100.0).round() as u8)
                .unwrap_or(DEFAULT_SCORE_DELTA),
        }
    }
}

pub async fn generate(
    executor: &FallbackExecutor,
    request: &AnalysisRequest,
    keyword: &KeywordAnalysis,
    grammar: &GrammarAnalysis,
    format: &FormatAnalysis,
    quantitative: &QuantitativeAnalysis,
) -> Vec<OptimizationSuggestion> {
    let missing = if keyword.missing_keywords.is_empty() {
        "none".to_string()
    } else {
        keyword.missing_keywords.join(", ")
    };
    let prompt = prompts::SUGGESTION_PROMPT_TEMPLATE
        .replace("{job_title}", &request.target_job.title)
        .replace("{keyword_score}", &keyword.score.to_string())
        .replace("{grammar_score}", &grammar.score.to_string())
        .replace("{format_score}", &format.score.to_string())
        .replace("{quantitative_score}", &quantitative.score.to_string())
        .replace("{missing_keywords}", &missing)
        .replace("{resume_text}", &request.resume_text);

    match generate_struct::<Vec<SuggestionWire>>(executor, &prompt, JSON_ONLY_SYSTEM).await {
        Ok(wires) if !wires.is_empty() => {
            wires.into_iter().map(SuggestionWire::into_suggestion).collect()
        }
        Ok(_) => {
            warn!("suggestion call returned an empty list, using generic suggestions");
            generic()
        }
        Err(e) => {
            warn!(error = %e, "suggestion generation degraded to generic suggestions");
            generic()
        }
    }
}

/// The two generic suggestions used when generation fails. Every resume
/// benefits from both, which is what makes them safe defaults.
pub fn generic() -> Vec<OptimizationSuggestion> {
    vec![
        OptimizationSuggestion {
            id: Uuid::new_v4(),
            kind: "keywords".to_string(),
            title: "Mirror the job posting's keywords".to_string(),
            description: "Applicant tracking systems rank resumes by keyword overlap with the \
                posting. Echo the posting's exact terminology where it is true of your experience."
                .to_string(),
            impact: "high".to_string(),
            actionable: "Pick the five most prominent keywords from the posting and work each \
                into an experience bullet."
                .to_string(),
            priority: 1,
            estimated_score_delta: 8,
        },
        OptimizationSuggestion {
            id: Uuid::new_v4(),
            kind: "achievements".to_string(),
            title: "Quantify your achievements".to_string(),
            description: "Bullets with concrete numbers read as evidence; bullets without read \
                as claims. Most resumes quantify fewer than half of their bullets."
                .to_string(),
            impact: "high".to_string(),
            actionable: "Add a percentage, absolute figure or scale indicator to each of your \
                top five bullets."
                .to_string(),
            priority: 2,
            estimated_score_delta: 6,
        },
    ]
}
