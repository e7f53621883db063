mod pending;
mod sequencer;

pub use pending::{PendingOperation, Settlement};
pub use sequencer::{LoadingSequencer, SequenceExit, StageTimings, run_stages};
