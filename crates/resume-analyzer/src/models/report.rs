//! Report value objects. Built once per request, immutable afterwards.
//!
//! Every task result carries `source` — the only visible signal of
//! degradation. A report whose tasks all ran on heuristics is structurally
//! identical to a fully-AI report; consumers need no special casing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Whether a task result came from a model response or a deterministic
/// heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultSource {
    Ai,
    Fallback,
}

/// Keyword coverage against the target job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordAnalysis {
    pub score: u8,
    pub matched_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
    pub suggestions: Vec<String>,
    pub source: ResultSource,
}

/// Grammar and readability quality.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrammarAnalysis {
    pub score: u8,
    pub error_count: u32,
    pub issues: Vec<String>,
    pub source: ResultSource,
}

/// Formatting and section structure. `structure_score` feeds the ATS
/// formula's structure input; `score` is the general formatting grade.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatAnalysis {
    pub score: u8,
    pub structure_score: u8,
    pub ats_compatible: bool,
    pub sections_found: Vec<String>,
    pub issues: Vec<String>,
    pub source: ResultSource,
}

/// Quantified-achievement density.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuantitativeAnalysis {
    pub score: u8,
    pub achievements_found: Vec<String>,
    pub suggested_additions: Vec<String>,
    pub source: ResultSource,
}

/// Overall strengths-and-weaknesses assessment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentAnalysis {
    pub score: u8,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub source: ResultSource,
}

/// A single actionable improvement, ranked by priority (1 = do first).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationSuggestion {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub description: String,
    pub impact: String,
    pub actionable: String,
    pub priority: u8,
    pub estimated_score_delta: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub word_count: usize,
    pub target_job_title: String,
    pub analysis_version: String,
    pub generated_at: DateTime<Utc>,
}

/// The aggregate analysis output — the sole product of this crate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub overall_score: u8,
    pub ats_score: u8,
    pub keyword: KeywordAnalysis,
    pub grammar: GrammarAnalysis,
    pub format: FormatAnalysis,
    pub quantitative: QuantitativeAnalysis,
    pub assessment: AssessmentAnalysis,
    pub suggestions: Vec<OptimizationSuggestion>,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub processing_time_ms: u64,
    pub metadata: ReportMetadata,
}
