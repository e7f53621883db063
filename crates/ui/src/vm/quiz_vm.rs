use quiz_core::model::{QuestionKind, TrueFalseChoice};
use services::{
    EngineKind, GradeOutcome, PendingGrade, QuizSessionController, SessionStatus, TypeRouter,
};
use tracing::debug;

use crate::views::ViewError;
use crate::vm::ResultsVm;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionVm {
    pub label: String,
    pub value: String,
    pub selected: bool,
    pub placeholder: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeedbackVm {
    pub is_correct: bool,
    pub correct_answer: String,
    pub explanation: String,
    pub verified: bool,
}

/// Everything the quiz screen renders for the current question.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionScreenVm {
    pub progress_label: String,
    pub text: String,
    pub engine: EngineKind,
    pub options: Vec<OptionVm>,
    pub diagnostic: Option<String>,
    pub locked: bool,
    pub grading: bool,
    pub feedback: Option<FeedbackVm>,
    pub error: Option<String>,
    pub can_advance: bool,
    pub can_go_back: bool,
    pub is_last: bool,
}

/// A running quiz plus the router that picks its answer engines.
pub struct QuizVm {
    controller: QuizSessionController,
    router: TypeRouter,
}

impl QuizVm {
    #[must_use]
    pub fn new(controller: QuizSessionController) -> Self {
        let mut vm = Self {
            controller,
            router: TypeRouter::new(),
        };
        vm.sync_router();
        vm
    }

    /// Points the router at the current question.
    fn sync_router(&mut self) {
        if let Err(err) = self.router.route(&self.controller) {
            debug!(error = %err, "no question to route");
        }
    }

    #[must_use]
    pub fn controller(&self) -> &QuizSessionController {
        &self.controller
    }

    /// # Errors
    ///
    /// Returns `ViewError::EmptyBank` when the session has no current question.
    pub fn screen(&self) -> Result<QuestionScreenVm, ViewError> {
        let question = self
            .controller
            .current_question()
            .map_err(|_| ViewError::EmptyBank)?;
        let state = self
            .controller
            .current_state()
            .map_err(|_| ViewError::EmptyBank)?;
        let panel = self.router.active().ok_or(ViewError::EmptyBank)?;
        let progress = self.controller.progress();

        let options = panel
            .options()
            .iter()
            .map(|option| OptionVm {
                label: option.label.clone(),
                value: option.value.clone(),
                selected: state.selected_answer.as_deref() == Some(option.value.as_str()),
                placeholder: option.placeholder,
            })
            .collect();

        let feedback = state.grade_result.as_ref().map(|result| FeedbackVm {
            is_correct: result.is_correct,
            correct_answer: display_answer(question.kind(), &result.correct_answer),
            explanation: result.explanation.clone(),
            verified: result.is_verified(),
        });

        Ok(QuestionScreenVm {
            progress_label: progress.label(),
            text: question.text().to_string(),
            engine: panel.kind(),
            options,
            diagnostic: panel.diagnostic(),
            locked: !state.accepts_selection(),
            grading: state.is_grading,
            feedback,
            error: state.error.as_ref().map(ToString::to_string),
            can_advance: self.controller.can_advance(),
            can_go_back: self.controller.position() > 0,
            is_last: progress.position + 1 == progress.total,
        })
    }

    /// First half of a selection; the returned grade is run without holding
    /// the view model.
    ///
    /// # Errors
    ///
    /// Returns `ViewError::Unknown` if the engine or controller rejects the
    /// answer.
    pub fn begin_selection(&mut self, answer: &str) -> Result<Option<PendingGrade>, ViewError> {
        self.router
            .begin_selection(&mut self.controller, answer)
            .map_err(|err| {
                debug!(error = %err, "selection rejected");
                ViewError::Unknown
            })
    }

    pub fn finish_grading(&mut self, outcome: GradeOutcome) {
        self.controller.finish_grading(outcome);
    }

    pub fn advance(&mut self) -> SessionStatus {
        let status = self.controller.advance();
        self.sync_router();
        status
    }

    pub fn previous(&mut self) -> bool {
        let moved = self.controller.previous();
        self.sync_router();
        moved
    }

    #[must_use]
    pub fn results(&self) -> ResultsVm {
        ResultsVm::from_controller(&self.controller)
    }
}

/// Shows true/false answers with the O/X labels the buttons use.
pub(crate) fn display_answer(kind: &QuestionKind, answer: &str) -> String {
    match (kind, TrueFalseChoice::parse(answer)) {
        (QuestionKind::TrueFalse, Some(choice)) => choice.label().to_string(),
        _ => answer.to_string(),
    }
}
