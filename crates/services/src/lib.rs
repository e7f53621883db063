#![forbid(unsafe_code)]

pub mod credentials;
pub mod error;
pub mod generation;
pub mod grading;
pub mod loading;
pub mod quiz_api;
pub mod sessions;

pub use quiz_core::Clock;

pub use credentials::{CredentialSource, SessionCredentials};
pub use error::{GenerationError, GradingError, SessionError};
pub use generation::{GenerationRequest, PendingGeneration, QuestionGenerator};
pub use grading::{AnswerGrader, GradeOutcome, GradingRoute, PendingGrade};
pub use loading::{
    LoadingSequencer, PendingOperation, SequenceExit, Settlement, StageTimings, run_stages,
};
pub use quiz_api::{QuizApiClient, QuizApiConfig};
pub use sessions::{
    AnswerOption, AnswerPanel, EngineKind, InteractionStore, MultipleChoiceEngine, QuestionReview,
    QuizService, QuizSessionController, SelectionOutcome, SessionProgress, SessionStatus,
    TrueFalseEngine, TypeRouter,
};
