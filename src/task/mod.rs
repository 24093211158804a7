// src/task/mod.rs

//! Progress-reporting background tasks.
//!
//! Every multi-step orchestration operation (packaging, publishing, pipeline
//! configuration) runs as a [`TaskWithProgress`]: the work function executes
//! on its own tokio task and pushes short human-readable notifications
//! through a [`TaskContext`] while the caller consumes them at its own pace.
//!
//! The design is message-passing: progress notifications travel over an
//! unbounded channel (so the producer never blocks on a slow consumer) and
//! the terminal outcome is the work function's return value, joined and
//! cached by [`TaskWithProgress::wait`]. Returning `Result<R>` encodes the
//! "exactly one of result/error" rule in the type system.

use std::future::Future;
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Handed to the work function; its only job is reporting progress.
pub struct TaskContext<P> {
    progress_tx: mpsc::UnboundedSender<P>,
}

impl<P> TaskContext<P> {
    /// Queue a progress notification for the consumer.
    ///
    /// Never blocks. If the consumer has dropped its handle, the
    /// notification is silently discarded.
    pub fn set_progress(&self, progress: P) {
        let _ = self.progress_tx.send(progress);
    }
}

/// Terminal error of a progress task.
///
/// Wraps the work function's error in an `Arc` so repeated calls to
/// [`TaskWithProgress::wait`] observe the same terminal value.
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct TaskError(Arc<anyhow::Error>);

impl TaskError {
    fn new(err: anyhow::Error) -> Self {
        Self(Arc::new(err))
    }

    /// The underlying error, for downcasting.
    pub fn inner(&self) -> &anyhow::Error {
        &self.0
    }
}

/// A unit of work that is already running and reports progress while it
/// drives towards exactly one terminal outcome.
pub struct TaskWithProgress<R, P> {
    progress_rx: mpsc::UnboundedReceiver<P>,
    handle: Option<JoinHandle<anyhow::Result<R>>>,
    outcome: Option<Result<R, TaskError>>,
}

impl<R, P> TaskWithProgress<R, P>
where
    R: Clone + Send + 'static,
    P: Send + 'static,
{
    /// Start `work` immediately on its own tokio task and return a live
    /// handle to it.
    ///
    /// The work function is not cancelled by this abstraction; it observes
    /// the caller's cancellation token through its own process invocations.
    pub fn spawn<F, Fut>(work: F) -> Self
    where
        F: FnOnce(TaskContext<P>) -> Fut,
        Fut: Future<Output = anyhow::Result<R>> + Send + 'static,
    {
        let (progress_tx, progress_rx) = mpsc::unbounded_channel();
        let ctx = TaskContext { progress_tx };
        let handle = tokio::spawn(work(ctx));

        Self {
            progress_rx,
            handle: Some(handle),
            outcome: None,
        }
    }

    /// Consume the next progress notification.
    ///
    /// Suspends only the consumer. Notifications arrive in the exact order
    /// they were produced; `None` once the work function has finished and
    /// every queued notification has been drained.
    pub async fn next_progress(&mut self) -> Option<P> {
        self.progress_rx.recv().await
    }

    /// Await the terminal outcome.
    ///
    /// Blocks until the work function finishes, then returns its result or
    /// error. Safe to call repeatedly; the same terminal value is returned
    /// once settled.
    pub async fn wait(&mut self) -> Result<R, TaskError> {
        if let Some(handle) = self.handle.take() {
            let outcome = match handle.await {
                Ok(Ok(value)) => Ok(value),
                Ok(Err(err)) => Err(TaskError::new(err)),
                Err(join_err) => Err(TaskError::new(anyhow::Error::new(join_err))),
            };
            self.outcome = Some(outcome);
        }

        self.outcome
            .clone()
            .expect("terminal outcome is recorded before the join handle is dropped")
    }
}
