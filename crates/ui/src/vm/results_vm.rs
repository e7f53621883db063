use quiz_core::time::format_elapsed;
use services::QuizSessionController;

use crate::vm::quiz_vm::display_answer;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReviewRowVm {
    pub number: usize,
    pub text: String,
    pub submitted: Option<String>,
    pub correct_answer: Option<String>,
    pub is_correct: Option<bool>,
    pub explanation: String,
    pub verified: bool,
}

/// Final score and per-question review for the results screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultsVm {
    pub correct: u32,
    pub total: u32,
    pub percent: u32,
    pub unverified: u32,
    pub elapsed: Option<String>,
    pub rows: Vec<ReviewRowVm>,
}

impl ResultsVm {
    #[must_use]
    pub fn from_controller(controller: &QuizSessionController) -> Self {
        let aggregate = controller.aggregate();
        let rows = controller
            .review()
            .into_iter()
            .map(|review| {
                let result = review.state.grade_result.as_ref();
                let kind = review.question.kind();
                ReviewRowVm {
                    number: review.position + 1,
                    text: review.question.text().to_string(),
                    submitted: review.state.selected_answer.clone(),
                    correct_answer: result.map(|r| display_answer(kind, &r.correct_answer)),
                    is_correct: result.map(|r| r.is_correct),
                    explanation: result.map(|r| r.explanation.clone()).unwrap_or_default(),
                    verified: result.is_some_and(|r| r.is_verified()),
                }
            })
            .collect();

        Self {
            correct: aggregate.correct_count(),
            total: aggregate.total_count(),
            percent: aggregate.percent(),
            unverified: aggregate.unverified_count(),
            elapsed: controller.elapsed().map(format_elapsed),
            rows,
        }
    }

    #[must_use]
    pub fn score_label(&self) -> String {
        format!("{} / {}", self.correct, self.total)
    }

    /// Note shown when some answers could only be checked locally.
    #[must_use]
    pub fn unverified_note(&self) -> Option<String> {
        match self.unverified {
            0 => None,
            1 => Some("1 answer was checked offline and may be inaccurate.".to_string()),
            n => Some(format!("{n} answers were checked offline and may be inaccurate.")),
        }
    }
}
