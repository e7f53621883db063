use quiz_core::model::{LoadingStage, StageBoard};
use services::{GenerationError, PendingGeneration, QuizService, SessionError};
use tracing::warn;

use crate::views::ViewError;
use crate::vm::QuizVm;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StageRowVm {
    pub label: &'static str,
    pub class: &'static str,
    pub marker: &'static str,
}

#[must_use]
pub fn map_stage_rows(board: &StageBoard) -> Vec<StageRowVm> {
    board
        .iter()
        .map(|(stage, state)| {
            let (class, marker) = match state {
                LoadingStage::Pending => ("stage pending", ""),
                LoadingStage::Active => ("stage active", "…"),
                LoadingStage::Done => ("stage done", "✓"),
            };
            StageRowVm {
                label: stage.label(),
                class,
                marker,
            }
        })
        .collect()
}

/// Collects the generated bank once loading is over and starts the quiz.
///
/// # Errors
///
/// Returns `ViewError::EmptyBank` when nothing was generated,
/// `ViewError::Generation` when the generator failed and `ViewError::Unknown`
/// when there was no generation to collect.
pub async fn finish_generation(
    quiz: &QuizService,
    pending: Option<PendingGeneration>,
) -> Result<QuizVm, ViewError> {
    let Some(pending) = pending else {
        return Err(ViewError::Unknown);
    };
    let bank = pending.outcome().await.map_err(|err| {
        warn!(error = %err, "generation did not produce a quiz");
        match err {
            GenerationError::EmptyBank => ViewError::EmptyBank,
            _ => ViewError::Generation,
        }
    })?;
    let controller = quiz.start_session(bank).map_err(|err| match err {
        SessionError::Empty => ViewError::EmptyBank,
        _ => ViewError::Unknown,
    })?;
    Ok(QuizVm::new(controller))
}
