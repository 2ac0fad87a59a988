//! Resume analysis engine — scores a resume against a target job using
//! rate-limited AI providers, and degrades gracefully when they fail.
//!
//! ARCHITECTURAL RULE: every analysis task must always produce a result.
//! AI generation and parsing failures are absorbed per task: the task falls
//! back to its deterministic heuristic and the report records
//! `source: "fallback"` for that task. The only caller-visible failure is an
//! empty resume.
//!
//! Entry point: [`ResumeAnalyzer::analyze`].

pub mod analysis;
pub mod config;
pub mod errors;
pub mod executor;
pub mod llm_client;
pub mod models;
pub mod orchestrator;
pub mod sanitizer;
pub mod scoring;

pub use config::AnalyzerConfig;
pub use errors::AnalysisError;
pub use executor::ProviderSpec;
pub use models::report::{AnalysisReport, OptimizationSuggestion, ResultSource};
pub use models::request::{AnalysisRequest, TargetJob};
pub use orchestrator::ResumeAnalyzer;
