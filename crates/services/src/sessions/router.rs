use quiz_core::model::{Question, QuestionKey, QuestionKind};
use tracing::debug;

use super::controller::{QuizSessionController, SelectionOutcome};
use super::engines::{AnswerOption, MultipleChoiceEngine, TrueFalseEngine};
use crate::error::SessionError;
use crate::grading::PendingGrade;

/// Which answer engine owns the current question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineKind {
    TrueFalse,
    MultipleChoice,
    Unsupported,
}

/// Answer-collection engine for one question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerPanel {
    TrueFalse(TrueFalseEngine),
    MultipleChoice(MultipleChoiceEngine),
    /// Unknown question type; rendered as a diagnostic, never answered.
    Unsupported { raw: String },
}

impl AnswerPanel {
    #[must_use]
    pub fn for_question(question: &Question) -> Self {
        match question.kind() {
            QuestionKind::TrueFalse => AnswerPanel::TrueFalse(TrueFalseEngine::default()),
            QuestionKind::MultipleChoice => {
                AnswerPanel::MultipleChoice(MultipleChoiceEngine::for_question(question))
            }
            QuestionKind::Unsupported(raw) => AnswerPanel::Unsupported { raw: raw.clone() },
        }
    }

    #[must_use]
    pub fn kind(&self) -> EngineKind {
        match self {
            AnswerPanel::TrueFalse(_) => EngineKind::TrueFalse,
            AnswerPanel::MultipleChoice(_) => EngineKind::MultipleChoice,
            AnswerPanel::Unsupported { .. } => EngineKind::Unsupported,
        }
    }

    #[must_use]
    pub fn options(&self) -> &[AnswerOption] {
        match self {
            AnswerPanel::TrueFalse(engine) => engine.options(),
            AnswerPanel::MultipleChoice(engine) => engine.options(),
            AnswerPanel::Unsupported { .. } => &[],
        }
    }

    /// Message shown in place of answer buttons, if any.
    #[must_use]
    pub fn diagnostic(&self) -> Option<String> {
        match self {
            AnswerPanel::Unsupported { raw } => {
                Some(format!("This question type ({raw}) is not supported yet."))
            }
            AnswerPanel::MultipleChoice(engine) if engine.is_degraded() => {
                Some("Some options for this question were missing.".to_string())
            }
            _ => None,
        }
    }

    /// Validates `answer` against this engine's options, then hands it to the
    /// controller. A question that is graded or grading yields `Ok(None)`
    /// before any validation.
    ///
    /// # Errors
    ///
    /// Returns `InvalidAnswer` for an answer this engine does not offer, and
    /// whatever `begin_selection` returns.
    pub fn begin_selection(
        &self,
        controller: &mut QuizSessionController,
        answer: &str,
    ) -> Result<Option<PendingGrade>, SessionError> {
        if !controller.current_state()?.accepts_selection() {
            return Ok(None);
        }
        let accepted = match self {
            AnswerPanel::TrueFalse(engine) => engine.accepts(answer),
            AnswerPanel::MultipleChoice(engine) => engine.accepts(answer),
            // The controller reports the unsupported type.
            AnswerPanel::Unsupported { .. } => true,
        };
        if !accepted {
            return Err(SessionError::InvalidAnswer {
                answer: answer.to_string(),
            });
        }
        controller.begin_selection(answer)
    }

    /// # Errors
    ///
    /// See [`begin_selection`](Self::begin_selection).
    pub async fn select(
        &self,
        controller: &mut QuizSessionController,
        answer: &str,
    ) -> Result<SelectionOutcome, SessionError> {
        let Some(pending) = self.begin_selection(controller, answer)? else {
            return Ok(SelectionOutcome::Ignored);
        };
        let outcome = pending.run().await;
        let graded = SelectionOutcome::Graded {
            is_correct: outcome.result.is_correct,
            verified: outcome.result.is_verified(),
        };
        controller.finish_grading(outcome);
        Ok(graded)
    }
}

/// Picks the answer engine for whichever question is current.
///
/// Only the active engine is kept; it is rebuilt whenever the current
/// question changes.
#[derive(Debug, Default)]
pub struct TypeRouter {
    active: Option<(QuestionKey, AnswerPanel)>,
}

impl TypeRouter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// # Errors
    ///
    /// Returns `OutOfRange` when the controller has no current question.
    pub fn route(&mut self, controller: &QuizSessionController) -> Result<&AnswerPanel, SessionError> {
        let key = controller.current_key()?;
        let panel = match self.active.take() {
            Some((active_key, panel)) if active_key == key => panel,
            _ => {
                let panel = AnswerPanel::for_question(controller.current_question()?);
                debug!(question = %key, engine = ?panel.kind(), "routing question");
                panel
            }
        };
        Ok(&self.active.insert((key, panel)).1)
    }

    /// Engine chosen by the last successful [`route`](Self::route).
    #[must_use]
    pub fn active(&self) -> Option<&AnswerPanel> {
        self.active.as_ref().map(|(_, panel)| panel)
    }

    /// Routes the current question and selects through its engine.
    ///
    /// # Errors
    ///
    /// See [`AnswerPanel::begin_selection`].
    pub fn begin_selection(
        &mut self,
        controller: &mut QuizSessionController,
        answer: &str,
    ) -> Result<Option<PendingGrade>, SessionError> {
        let panel = self.route(controller)?.clone();
        panel.begin_selection(controller, answer)
    }
}
