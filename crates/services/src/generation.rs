use async_trait::async_trait;
use quiz_core::model::QuestionBank;
use serde::Serialize;

use crate::error::GenerationError;
use crate::loading::PendingOperation;

/// A generation run that has been spawned but may not have settled yet.
pub type PendingGeneration = PendingOperation<Result<QuestionBank, GenerationError>>;

/// Input for a question-generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    text: String,
    question_count: u8,
}

impl GenerationRequest {
    pub const MAX_QUESTIONS: u8 = 20;
    pub const DEFAULT_QUESTIONS: u8 = 5;

    /// # Errors
    ///
    /// Returns `GenerationError::Invalid` for blank source text or a question
    /// count outside `1..=MAX_QUESTIONS`.
    pub fn new(text: impl Into<String>, question_count: u8) -> Result<Self, GenerationError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(GenerationError::Invalid("source text is empty".into()));
        }
        if question_count == 0 || question_count > Self::MAX_QUESTIONS {
            return Err(GenerationError::Invalid(format!(
                "question count must be between 1 and {}",
                Self::MAX_QUESTIONS
            )));
        }
        Ok(Self {
            text,
            question_count,
        })
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn question_count(&self) -> u8 {
        self.question_count
    }
}

/// Produces a question bank from user material.
#[async_trait]
pub trait QuestionGenerator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<QuestionBank, GenerationError>;
}
