use std::fmt;
use std::future::Future;

use crossbeam_channel::Sender;
use futures::FutureExt;
use tracing::debug;

use crate::error::{LooperError, LooperResult};
use crate::looper::{Action, Job};
use crate::task::Task;

/// Cloneable, thread-safe entry point into a [`crate::Looper`].
///
/// Holding a handle is how code "posts back to the loop": capture one
/// explicitly wherever a continuation must run on the loop thread.
#[derive(Clone)]
pub struct LooperHandle {
    tx: Sender<Job>,
}

impl LooperHandle {
    pub(crate) fn new(tx: Sender<Job>) -> Self {
        Self { tx }
    }

    /// Appends `action` to the tail of the queue without waiting for it to run.
    ///
    /// Callable from any thread, the loop thread included.
    pub fn enqueue<F>(&self, action: F) -> LooperResult<()>
    where
        F: FnOnce() + Send + 'static,
    {
        self.submit(Box::new(move || {
            action();
            Ok(())
        }))
    }

    /// Like [`LooperHandle::enqueue`], but an `Err` is reported to the error hooks.
    pub fn enqueue_fallible<F>(&self, action: F) -> LooperResult<()>
    where
        F: FnOnce() -> anyhow::Result<()> + Send + 'static,
    {
        self.submit(Box::new(action))
    }

    /// Runs `future` on the loop thread.
    ///
    /// The first poll and every continuation after a wake-up are enqueued as
    /// separate actions, so the future never runs concurrently with other work.
    /// An `Err` output is reported to the error hooks.
    pub fn spawn<Fut>(&self, future: Fut) -> LooperResult<()>
    where
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        Task::spawn(self.clone(), future.boxed())
    }

    /// Requests the loop to exit once the queue has drained.
    pub fn stop(&self) {
        if self.tx.send(Job::Stop).is_err() {
            debug!("stop requested on a closed looper");
        }
    }

    /// Number of queued entries not yet consumed.
    pub fn pending(&self) -> usize {
        self.tx.len()
    }

    pub(crate) fn submit(&self, action: Action) -> LooperResult<()> {
        self.tx
            .send(Job::Run(action))
            .map_err(|_| LooperError::Closed)
    }
}

impl fmt::Debug for LooperHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LooperHandle")
            .field("pending", &self.tx.len())
            .finish()
    }
}
