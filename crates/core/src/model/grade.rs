use serde::{Deserialize, Serialize};

/// Where a grade came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GradeSource {
    /// Returned by the grading backend.
    #[default]
    Server,
    /// Synthesized locally after the backend call failed.
    LocalFallback,
}

/// Outcome of grading one answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeResult {
    pub correct_answer: String,
    pub submitted_answer: String,
    pub is_correct: bool,
    #[serde(default)]
    pub explanation: String,
    #[serde(skip)]
    pub source: GradeSource,
}

impl GradeResult {
    /// Best-effort grade built by direct comparison against the stored answer.
    #[must_use]
    pub fn local_fallback(submitted_answer: &str, correct_answer: &str) -> Self {
        Self {
            correct_answer: correct_answer.to_string(),
            submitted_answer: submitted_answer.to_string(),
            is_correct: answers_match(submitted_answer, correct_answer),
            explanation: String::new(),
            source: GradeSource::LocalFallback,
        }
    }

    #[must_use]
    pub fn is_verified(&self) -> bool {
        self.source == GradeSource::Server
    }
}

/// Direct comparison used when the backend is unreachable.
#[must_use]
pub fn answers_match(submitted: &str, correct: &str) -> bool {
    submitted.trim() == correct.trim()
}
