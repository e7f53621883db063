mod controller;
mod engines;
mod progress;
mod router;
mod store;
mod workflow;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use controller::{QuestionReview, QuizSessionController, SelectionOutcome, SessionStatus};
pub use engines::{
    AnswerOption, MULTIPLE_CHOICE_OPTION_COUNT, MultipleChoiceEngine, TrueFalseEngine,
};
pub use progress::SessionProgress;
pub use router::{AnswerPanel, EngineKind, TypeRouter};
pub use store::InteractionStore;
pub use workflow::QuizService;
