use std::sync::Arc;
use std::time::Duration;

use quiz_core::model::{Stage, StageBoard};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::pending::Settlement;

/// Fixed pacing of the loading screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageTimings {
    /// Time spent on the first stage before generation is shown as active.
    pub reading: Duration,
    /// How often the generation stage checks whether the operation settled.
    pub poll_interval: Duration,
    /// Time the third stage stays active.
    pub preparing: Duration,
    /// Pause after the last stage before the completion callback fires.
    pub settle: Duration,
}

impl Default for StageTimings {
    fn default() -> Self {
        Self::scaled(Duration::from_secs(1))
    }
}

impl StageTimings {
    /// Timings expressed in multiples of `unit` (2, 0.1, 1, 1).
    #[must_use]
    pub fn scaled(unit: Duration) -> Self {
        Self {
            reading: unit * 2,
            poll_interval: unit / 10,
            preparing: unit,
            settle: unit,
        }
    }
}

/// How a sequencer run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceExit {
    Completed,
    Cancelled,
}

/// Sleeps unless cancelled first. `false` means the run must stop.
async fn pause(cancel: &CancellationToken, duration: Duration) -> bool {
    tokio::select! {
        biased;
        () = cancel.cancelled() => false,
        () = tokio::time::sleep(duration) => !cancel.is_cancelled(),
    }
}

/// Drives the three loading stages for one run.
///
/// Every snapshot goes through `publish`. The generation stage stays active
/// until `settlement` is set. `on_complete` runs at most once and never after
/// `cancel` has fired.
pub async fn run_stages<P, C>(
    timings: StageTimings,
    settlement: &Settlement,
    cancel: &CancellationToken,
    mut publish: P,
    on_complete: C,
) -> SequenceExit
where
    P: FnMut(StageBoard),
    C: FnOnce(),
{
    if cancel.is_cancelled() {
        return SequenceExit::Cancelled;
    }

    let mut board = StageBoard::pending();
    publish(board);
    board.activate(Stage::Reading);
    publish(board);

    if !pause(cancel, timings.reading).await {
        return SequenceExit::Cancelled;
    }
    board.hand_over(Stage::Reading, Stage::Generating);
    publish(board);
    debug!("loading: waiting for generation");

    while !settlement.is_settled() {
        if !pause(cancel, timings.poll_interval).await {
            return SequenceExit::Cancelled;
        }
    }
    board.hand_over(Stage::Generating, Stage::Preparing);
    publish(board);
    debug!("loading: generation settled");

    if !pause(cancel, timings.preparing).await {
        return SequenceExit::Cancelled;
    }
    board.finish(Stage::Preparing);
    publish(board);

    if !pause(cancel, timings.settle).await {
        return SequenceExit::Cancelled;
    }
    on_complete();
    SequenceExit::Completed
}

struct ActiveRun {
    cancel: CancellationToken,
    task: JoinHandle<SequenceExit>,
}

/// Spawned form of [`run_stages`] with a watchable stage board.
///
/// Dropping the sequencer cancels the current run.
pub struct LoadingSequencer {
    timings: StageTimings,
    board: Arc<watch::Sender<StageBoard>>,
    run: Option<ActiveRun>,
}

impl LoadingSequencer {
    #[must_use]
    pub fn new(timings: StageTimings) -> Self {
        let (board, _) = watch::channel(StageBoard::pending());
        Self {
            timings,
            board: Arc::new(board),
            run: None,
        }
    }

    /// Starts a fresh run, cancelling any run in progress and resetting all
    /// stages to pending.
    pub fn start<C>(&mut self, settlement: Settlement, on_complete: C)
    where
        C: FnOnce() + Send + 'static,
    {
        self.cancel();
        self.board.send_replace(StageBoard::pending());

        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let board = Arc::clone(&self.board);
        let timings = self.timings;
        let task = tokio::spawn(async move {
            let publish_token = token.clone();
            run_stages(
                timings,
                &settlement,
                &token,
                move |snapshot| {
                    if !publish_token.is_cancelled() {
                        board.send_replace(snapshot);
                    }
                },
                on_complete,
            )
            .await
        });
        self.run = Some(ActiveRun { cancel, task });
    }

    /// Tears down the current run. Its callback will not fire.
    pub fn cancel(&mut self) {
        if let Some(run) = self.run.take() {
            debug!("loading: sequencer cancelled");
            run.cancel.cancel();
            run.task.abort();
        }
    }

    #[must_use]
    pub fn board(&self) -> StageBoard {
        *self.board.borrow()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<StageBoard> {
        self.board.subscribe()
    }

    /// Waits for the current run to end. `None` when nothing is running.
    pub async fn wait(&mut self) -> Option<SequenceExit> {
        let run = self.run.take()?;
        run.task.await.ok()
    }
}

impl Drop for LoadingSequencer {
    fn drop(&mut self) {
        self.cancel();
    }
}
