// Cross-cutting prompt fragments shared by the analysis tasks.
// Each task defines its own templates in analysis/prompts.rs.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Instruction appended to analysis prompts so scores stay comparable
/// across tasks and across calls.
pub const SCORING_INSTRUCTION: &str = "\
    Scores are integers from 0 to 100. \
    50 means average for the role's seniority; 80+ means clearly strong; \
    below 40 means a significant problem the candidate must fix. \
    Never inflate scores to be polite.";
