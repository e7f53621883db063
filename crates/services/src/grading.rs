use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use quiz_core::model::{GradeResult, InteractionError, QuestionKey};
use tracing::{debug, warn};

use crate::credentials::CredentialSource;
use crate::error::GradingError;

/// Which grading endpoint a submission goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradingRoute {
    Guest,
    Member,
}

impl GradingRoute {
    /// Consults the credential capability exactly once.
    #[must_use]
    pub fn resolve(credentials: &dyn CredentialSource) -> Self {
        if credentials.is_authenticated() {
            GradingRoute::Member
        } else {
            GradingRoute::Guest
        }
    }
}

/// Grades a normalized answer for a question.
///
/// Guest and member routes share this contract; implementations pick the
/// endpoint from `route`.
#[async_trait]
pub trait AnswerGrader: Send + Sync {
    async fn grade(
        &self,
        question_id: u64,
        answer: &str,
        route: GradingRoute,
    ) -> Result<GradeResult, GradingError>;
}

/// Result of a finished grading attempt, addressed to the question it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradeOutcome {
    pub key: QuestionKey,
    pub result: GradeResult,
    pub error: Option<InteractionError>,
}

/// A grading request that has been accepted but not yet sent.
///
/// Produced by `QuizSessionController::begin_selection`; the controller is
/// free to be borrowed elsewhere while `run` is awaited.
pub struct PendingGrade {
    key: QuestionKey,
    question_id: u64,
    answer: String,
    correct_answer: String,
    route: GradingRoute,
    grader: Arc<dyn AnswerGrader>,
}

impl PendingGrade {
    pub(crate) fn new(
        key: QuestionKey,
        question_id: u64,
        answer: String,
        correct_answer: String,
        route: GradingRoute,
        grader: Arc<dyn AnswerGrader>,
    ) -> Self {
        Self {
            key,
            question_id,
            answer,
            correct_answer,
            route,
            grader,
        }
    }

    #[must_use]
    pub fn key(&self) -> QuestionKey {
        self.key
    }

    /// The answer in wire vocabulary.
    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }

    #[must_use]
    pub fn route(&self) -> GradingRoute {
        self.route
    }

    /// Calls the grader. A failed call still yields a result, built by
    /// comparing the answer with the stored correct answer.
    pub async fn run(self) -> GradeOutcome {
        match self
            .grader
            .grade(self.question_id, &self.answer, self.route)
            .await
        {
            Ok(result) => {
                debug!(question = %self.key, route = ?self.route, correct = result.is_correct, "answer graded");
                GradeOutcome {
                    key: self.key,
                    result,
                    error: None,
                }
            }
            Err(err) => {
                warn!(question = %self.key, route = ?self.route, error = %err, "grading failed, comparing locally");
                GradeOutcome {
                    key: self.key,
                    result: GradeResult::local_fallback(&self.answer, &self.correct_answer),
                    error: Some(InteractionError::GradingFailed {
                        message: err.to_string(),
                    }),
                }
            }
        }
    }
}

impl fmt::Debug for PendingGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingGrade")
            .field("key", &self.key)
            .field("question_id", &self.question_id)
            .field("answer", &self.answer)
            .field("route", &self.route)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::SessionCredentials;
    use quiz_core::model::GradeSource;

    struct Offline;

    #[async_trait]
    impl AnswerGrader for Offline {
        async fn grade(
            &self,
            _question_id: u64,
            _answer: &str,
            _route: GradingRoute,
        ) -> Result<GradeResult, GradingError> {
            Err(GradingError::Rejected("offline".into()))
        }
    }

    #[test]
    fn route_follows_credentials() {
        assert_eq!(
            GradingRoute::resolve(&SessionCredentials::guest()),
            GradingRoute::Guest
        );
        assert_eq!(
            GradingRoute::resolve(&SessionCredentials::with_token("t")),
            GradingRoute::Member
        );
    }

    #[tokio::test]
    async fn failed_call_falls_back_to_local_comparison() {
        let pending = PendingGrade::new(
            QuestionKey::Position(0),
            0,
            "TRUE".into(),
            "TRUE".into(),
            GradingRoute::Guest,
            Arc::new(Offline),
        );
        let outcome = pending.run().await;
        assert!(outcome.result.is_correct);
        assert_eq!(outcome.result.source, GradeSource::LocalFallback);
        assert!(matches!(
            outcome.error,
            Some(InteractionError::GradingFailed { .. })
        ));
    }
}
