use thiserror::Error;

/// Structural misuse of a question bank.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    #[error("question index {index} is out of range for a bank of {len}")]
    OutOfRange { index: usize, len: usize },

    #[error("unsupported question type: {raw}")]
    UnsupportedQuestionType { raw: String },
}
