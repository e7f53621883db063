use thiserror::Error;

use crate::model::grade::GradeResult;

/// Failure recorded against a single question. Never blocks the session.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InteractionError {
    #[error("grading failed: {message}")]
    GradingFailed { message: String },
}

/// Mutable interaction state for one question.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionInteractionState {
    pub selected_answer: Option<String>,
    pub is_grading: bool,
    pub grade_result: Option<GradeResult>,
    pub error: Option<InteractionError>,
}

impl QuestionInteractionState {
    #[must_use]
    pub fn is_graded(&self) -> bool {
        self.grade_result.is_some()
    }

    /// A selection is accepted only before grading starts.
    #[must_use]
    pub fn accepts_selection(&self) -> bool {
        !self.is_grading && self.grade_result.is_none()
    }

    #[must_use]
    pub fn is_correct(&self) -> Option<bool> {
        self.grade_result.as_ref().map(|result| result.is_correct)
    }
}
