//! Cancellable one-shot timers
//!
//! Every scheduled callback is represented by an explicit [`CancelHandle`].
//! Dropping the handle aborts the pending task, so no code path can leak a
//! timer that outlives the state it references.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;

/// Handle to a spawned background task.
///
/// The task is aborted when the handle is cancelled or dropped. A task that
/// has started running and wants to keep running past the handle's lifetime
/// must [`disarm`](CancelHandle::disarm) it first.
#[derive(Debug)]
pub struct CancelHandle {
    handle: Option<JoinHandle<()>>,
}

impl CancelHandle {
    /// Wrap an already spawned task.
    pub fn new(handle: JoinHandle<()>) -> Self {
        Self {
            handle: Some(handle),
        }
    }

    /// Abort the pending task.
    pub fn cancel(mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    /// Release the handle without aborting the task.
    ///
    /// Used by a fired timer to drop its own entry from shared state without
    /// scheduling its own cancellation.
    pub fn disarm(mut self) {
        self.handle.take();
    }

    /// Whether the task has already run to completion.
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().is_none_or(JoinHandle::is_finished)
    }
}

impl Drop for CancelHandle {
    fn drop(&mut self) {
        if let Some(handle) = &self.handle {
            handle.abort();
        }
    }
}

/// Schedule a one-shot callback after `delay`.
pub fn spawn_after<F>(delay: Duration, task: F) -> CancelHandle
where
    F: Future<Output = ()> + Send + 'static,
{
    CancelHandle::new(tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        task.await;
    }))
}
