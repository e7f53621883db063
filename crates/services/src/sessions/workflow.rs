use std::sync::Arc;

use quiz_core::model::QuestionBank;
use tracing::{debug, warn};

use super::controller::QuizSessionController;
use crate::Clock;
use crate::credentials::CredentialSource;
use crate::error::SessionError;
use crate::generation::{GenerationRequest, PendingGeneration, QuestionGenerator};
use crate::grading::AnswerGrader;
use crate::loading::{PendingOperation, StageTimings};

/// Wires generation, grading and credentials into quiz sessions.
#[derive(Clone)]
pub struct QuizService {
    clock: Clock,
    generator: Arc<dyn QuestionGenerator>,
    grader: Arc<dyn AnswerGrader>,
    credentials: Arc<dyn CredentialSource>,
    timings: StageTimings,
}

impl QuizService {
    #[must_use]
    pub fn new(
        clock: Clock,
        generator: Arc<dyn QuestionGenerator>,
        grader: Arc<dyn AnswerGrader>,
        credentials: Arc<dyn CredentialSource>,
    ) -> Self {
        Self {
            clock,
            generator,
            grader,
            credentials,
            timings: StageTimings::default(),
        }
    }

    #[must_use]
    pub fn stage_timings(&self) -> StageTimings {
        self.timings
    }

    /// Spawns a generation run. Its settlement drives the loading screen;
    /// its outcome is read once the loading sequence completes.
    #[must_use]
    pub fn generate(&self, request: GenerationRequest) -> PendingGeneration {
        let generator = Arc::clone(&self.generator);
        PendingOperation::spawn(async move {
            debug!(questions = request.question_count(), "generation requested");
            let result = generator.generate(&request).await;
            match &result {
                Ok(bank) => debug!(questions = bank.len(), "generation finished"),
                Err(err) => warn!(error = %err, "generation failed"),
            }
            result
        })
    }

    /// Starts a session over a generated bank.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` if the bank has no questions.
    pub fn start_session(&self, bank: QuestionBank) -> Result<QuizSessionController, SessionError> {
        if bank.is_empty() {
            return Err(SessionError::Empty);
        }
        Ok(QuizSessionController::new(
            bank,
            Arc::clone(&self.grader),
            Arc::clone(&self.credentials),
            self.clock,
        ))
    }
}
