mod aggregate;
mod bank;
mod grade;
mod ids;
mod interaction;
mod loading;
mod question;

pub use aggregate::SessionAggregate;
pub use bank::{IdentityScheme, QuestionBank};
pub use grade::{GradeResult, GradeSource, answers_match};
pub use ids::{ParseIdError, QuestionId, QuestionKey};
pub use interaction::{InteractionError, QuestionInteractionState};
pub use loading::{LoadingStage, Stage, StageBoard};
pub use question::{Question, QuestionKind, TrueFalseChoice, WIRE_FALSE, WIRE_TRUE};
