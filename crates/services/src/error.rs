//! Shared error types for the services crate.

use thiserror::Error;

/// Errors emitted by the quiz session controller and its answer engines.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no questions available for session")]
    Empty,
    #[error("answer {answer:?} is not one of the offered options")]
    InvalidAnswer { answer: String },
    #[error(transparent)]
    Bank(#[from] quiz_core::Error),
}

/// Failure of a grading call. The controller downgrades these to a local
/// comparison instead of propagating them.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GradingError {
    #[error("grading request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error("grading rejected: {0}")]
    Rejected(String),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Failure while producing a question bank.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GenerationError {
    #[error("invalid generation request: {0}")]
    Invalid(String),
    #[error("generation returned no questions")]
    EmptyBank,
    #[error("generation request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error("generation task stopped before finishing")]
    Aborted,
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

impl From<tokio::task::JoinError> for GenerationError {
    fn from(_: tokio::task::JoinError) -> Self {
        GenerationError::Aborted
    }
}
