// All LLM prompt constants for the analysis tasks.
// Cross-cutting fragments live in llm_client::prompts.

/// System prompt for keyword coverage analysis — enforces JSON-only output.
pub const KEYWORD_SYSTEM: &str =
    "You are an expert ATS consultant and resume strategist. \
    Compare a resume against a target job's keywords. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

/// Keyword analysis prompt template.
/// Replace: {job_title}, {keywords}, {resume_text}, {scoring_instruction}
pub const KEYWORD_PROMPT_TEMPLATE: &str = r#"Analyze how well the resume below covers the keywords for the target job.

Return a JSON object with this EXACT schema (no extra fields):
{
  "score": 72,
  "matched_keywords": ["React", "TypeScript"],
  "missing_keywords": ["GraphQL"],
  "suggestions": ["Mention GraphQL in a recent project bullet"]
}

Rules:
- A keyword counts as matched when the resume demonstrates it, not merely names it.
- score reflects weighted coverage: frequent/title keywords matter more than nice-to-haves.
- {scoring_instruction}

TARGET JOB: {job_title}
KEYWORDS: {keywords}

RESUME:
{resume_text}"#;

/// System prompt for grammar and readability analysis.
pub const GRAMMAR_SYSTEM: &str =
    "You are a professional copy editor who specializes in resumes. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

/// Grammar analysis prompt template.
/// Replace: {resume_text}, {scoring_instruction}
pub const GRAMMAR_PROMPT_TEMPLATE: &str = r#"Review the resume below for grammar, spelling, consistency and readability.

Return a JSON object with this EXACT schema (no extra fields):
{
  "score": 88,
  "error_count": 2,
  "issues": ["Inconsistent tense in the second bullet", "Run-on sentence in summary"]
}

Rules:
- error_count is the number of concrete defects found, not a severity grade.
- Flag passive constructions and filler phrases ("responsible for", "duties included") as issues.
- {scoring_instruction}

RESUME:
{resume_text}"#;

/// System prompt for format and structure analysis.
pub const FORMAT_SYSTEM: &str =
    "You are an ATS compatibility auditor. \
    Judge machine-readability and section organization, not writing quality. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

/// Format analysis prompt template.
/// Replace: {resume_text}, {scoring_instruction}
pub const FORMAT_PROMPT_TEMPLATE: &str = r#"Audit the formatting and section structure of the resume below.

Return a JSON object with this EXACT schema (no extra fields):
{
  "score": 85,
  "structure_score": 80,
  "ats_compatible": true,
  "sections_found": ["summary", "experience", "education", "skills"],
  "issues": ["No dedicated skills section"]
}

Rules:
- score grades overall formatting: scannability, bullet usage, length discipline.
- structure_score grades section organization only: canonical sections present, in a sensible order.
- ats_compatible is false when tables, columns or unusual headers would break automated parsing.
- {scoring_instruction}

RESUME:
{resume_text}"#;

/// System prompt for quantified-achievement analysis.
pub const QUANTITATIVE_SYSTEM: &str =
    "You are a resume coach focused on measurable impact. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

/// Quantitative analysis prompt template.
/// Replace: {resume_text}, {scoring_instruction}
pub const QUANTITATIVE_PROMPT_TEMPLATE: &str = r#"Assess how well the resume below quantifies its achievements.

Return a JSON object with this EXACT schema (no extra fields):
{
  "score": 70,
  "achievements_found": ["Improved system performance by 40%"],
  "suggested_additions": ["Quantify the team size you led"]
}

Rules:
- achievements_found lists bullets that already carry a concrete number, percentage or scale.
- suggested_additions names specific claims in the resume that should be quantified, not generic advice.
- {scoring_instruction}

RESUME:
{resume_text}"#;

/// System prompt for the strengths/weaknesses assessment.
pub const ASSESSMENT_SYSTEM: &str =
    "You are a senior hiring manager giving a candid resume assessment. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

/// Assessment prompt template.
/// Replace: {job_title}, {resume_text}, {scoring_instruction}
pub const ASSESSMENT_PROMPT_TEMPLATE: &str = r#"Give an overall assessment of the resume below for the target role.

Return a JSON object with this EXACT schema (no extra fields):
{
  "score": 75,
  "strengths": ["Strong quantified impact in recent roles"],
  "weaknesses": ["No evidence of production ownership"]
}

Rules:
- Strengths and weaknesses are specific to THIS resume and THIS role — no boilerplate.
- Three to five entries per list; never empty lists.
- {scoring_instruction}

TARGET ROLE: {job_title}

RESUME:
{resume_text}"#;

/// Suggestion generation prompt template, run after the four sub-analyses.
/// Replace: {job_title}, {keyword_score}, {grammar_score}, {format_score},
///          {quantitative_score}, {missing_keywords}, {resume_text}
pub const SUGGESTION_PROMPT_TEMPLATE: &str = r#"Generate prioritized optimization suggestions for the resume below.

Sub-analysis scores for context:
- keyword coverage vs "{job_title}": {keyword_score}/100 (missing: {missing_keywords})
- grammar and readability: {grammar_score}/100
- format and structure: {format_score}/100
- quantified achievements: {quantitative_score}/100

Return a JSON ARRAY with this EXACT element schema (no extra fields):
[
  {
    "type": "keywords",
    "title": "Work GraphQL into recent experience",
    "description": "The target role lists GraphQL prominently but the resume never mentions it.",
    "impact": "high",
    "actionable": "Add a bullet to your current role describing the GraphQL API you built or consumed.",
    "priority": 1,
    "estimated_score_delta": 8
  }
]

Rules:
- Three to six suggestions, ordered by priority (1 = do first, 5 = nice to have).
- type is one of: "keywords", "achievements", "format", "grammar", "content".
- estimated_score_delta is the realistic overall-score gain, an integer from 1 to 20.
- Target the WEAKEST sub-scores first.

RESUME:
{resume_text}"#;
