use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::task::{JoinError, JoinHandle};

/// Shared "has the operation settled" flag.
///
/// Success and failure both count as settled.
#[derive(Debug, Clone, Default)]
pub struct Settlement(Arc<AtomicBool>);

impl Settlement {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A flag that is already set.
    #[must_use]
    pub fn settled() -> Self {
        let settlement = Self::new();
        settlement.mark_settled();
        settlement
    }

    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    pub fn mark_settled(&self) {
        self.0.store(true, Ordering::Release);
    }
}

/// Marks the flag even when the tracked future panics or is aborted.
struct SettleOnDrop(Settlement);

impl Drop for SettleOnDrop {
    fn drop(&mut self) {
        self.0.mark_settled();
    }
}

/// A spawned operation whose settlement can be polled without awaiting it.
#[derive(Debug)]
pub struct PendingOperation<T> {
    settlement: Settlement,
    handle: JoinHandle<T>,
}

impl<T: Send + 'static> PendingOperation<T> {
    /// Spawns `future` on the current tokio runtime.
    pub fn spawn<F>(future: F) -> Self
    where
        F: Future<Output = T> + Send + 'static,
    {
        let settlement = Settlement::new();
        let guard = SettleOnDrop(settlement.clone());
        let handle = tokio::spawn(async move {
            let _guard = guard;
            future.await
        });
        Self { settlement, handle }
    }

    #[must_use]
    pub fn settlement(&self) -> Settlement {
        self.settlement.clone()
    }

    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.settlement.is_settled()
    }

    pub fn abort(&self) {
        self.handle.abort();
    }

    /// # Errors
    ///
    /// Returns the `JoinError` if the task panicked or was aborted.
    pub async fn join(self) -> Result<T, JoinError> {
        self.handle.await
    }
}

impl<T, E> PendingOperation<Result<T, E>>
where
    T: Send + 'static,
    E: From<JoinError> + Send + 'static,
{
    /// Joins the task and folds a lost task into the operation's own error type.
    ///
    /// # Errors
    ///
    /// Returns the operation's error, or `E::from(JoinError)` if the task died.
    pub async fn outcome(self) -> Result<T, E> {
        self.handle.await?
    }
}
