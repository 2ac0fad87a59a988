use thiserror::Error;

/// Caller-facing error type for the analysis engine.
///
/// Provider exhaustion and malformed model output are NOT represented here:
/// both are absorbed at the task boundary and converted into heuristic
/// fallback results. A request either fails fast on invalid input or
/// produces a complete report.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("resume text is empty")]
    EmptyInput,

    #[error("analysis failed: {0}")]
    Internal(#[from] anyhow::Error),
}
