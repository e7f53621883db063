mod loading_vm;
mod quiz_vm;
mod results_vm;

pub use loading_vm::{StageRowVm, finish_generation, map_stage_rows};
pub use quiz_vm::{FeedbackVm, OptionVm, QuestionScreenVm, QuizVm};
pub use results_vm::{ResultsVm, ReviewRowVm};
