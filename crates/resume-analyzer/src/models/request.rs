use serde::{Deserialize, Serialize};

/// The job a resume is being scored against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetJob {
    pub title: String,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Raw comma-separated keyword list as entered by the user.
    #[serde(default)]
    pub keywords: Option<String>,
}

impl TargetJob {
    /// Splits the raw keyword list into trimmed, non-empty entries.
    pub fn keyword_list(&self) -> Vec<String> {
        self.keywords
            .as_deref()
            .unwrap_or("")
            .split(',')
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// One analysis request. Consumed once; never outlives the call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub resume_text: String,
    pub target_job: TargetJob,
    #[serde(default)]
    pub template_id: Option<String>,
}

impl AnalysisRequest {
    pub fn word_count(&self) -> usize {
        self.resume_text.split_whitespace().count()
    }
}
