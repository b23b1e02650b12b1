//! The run-loop itself: queue ownership and the draining consumer.

use std::panic::{catch_unwind, AssertUnwindSafe};

use crossbeam_channel::{unbounded, Receiver, Sender};
use tracing::{debug, error};

use crate::error::LooperError;
use crate::handle::LooperHandle;

/// A deferred unit of work executed on the loop thread.
///
/// Infallible actions are wrapped so they always return `Ok(())`.
pub type Action = Box<dyn FnOnce() -> anyhow::Result<()> + Send + 'static>;

type ErrorHook = Box<dyn FnMut(&LooperError) + Send + 'static>;

/// Entries carried by the queue.
pub(crate) enum Job {
    /// Run the wrapped action.
    Run(Action),
    /// Stop once the queue is empty.
    Stop,
}

/// Counters reported when [`Looper::run`] returns.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of actions executed, failed ones included.
    pub executed: u64,
    /// Number of actions that panicked or returned an error.
    pub failed: u64,
}

/// Owner of the action queue and its single consumer.
pub struct Looper {
    tx: Sender<Job>,
    rx: Receiver<Job>,
    hooks: Vec<ErrorHook>,
}

impl Looper {
    /// Creates a looper with an empty, unbounded queue.
    pub fn new() -> Self {
        let (tx, rx) = unbounded();
        Self {
            tx,
            rx,
            hooks: Vec::new(),
        }
    }

    /// Returns a thread-safe handle for enqueueing work and requesting a stop.
    pub fn handle(&self) -> LooperHandle {
        LooperHandle::new(self.tx.clone())
    }

    /// Registers a hook notified, on the loop thread, of every failed action.
    ///
    /// Without any hook failures are logged through `tracing`.
    pub fn on_error<F>(&mut self, hook: F)
    where
        F: FnMut(&LooperError) + Send + 'static,
    {
        self.hooks.push(Box::new(hook));
    }

    /// Number of queued entries not yet consumed.
    pub fn pending(&self) -> usize {
        self.rx.len()
    }

    /// Runs the loop on the calling thread.
    ///
    /// Blocks until a stop has been requested and every queued action, including
    /// the ones enqueued while draining, has executed. Also returns once every
    /// handle is gone and the queue is empty, since no work can arrive anymore.
    pub fn run(self) -> RunSummary {
        let Looper { tx, rx, mut hooks } = self;
        drop(tx);

        let mut summary = RunSummary::default();
        debug!("looper running");

        loop {
            match rx.recv() {
                Ok(Job::Run(action)) => execute(action, &mut hooks, &mut summary),
                Ok(Job::Stop) => break,
                Err(_) => {
                    debug!("every looper handle dropped; leaving the loop");
                    return summary;
                }
            }
        }

        debug!(pending = rx.len(), "stop requested; draining queue");
        while let Ok(job) = rx.try_recv() {
            if let Job::Run(action) = job {
                execute(action, &mut hooks, &mut summary);
            }
        }

        debug!(
            executed = summary.executed,
            failed = summary.failed,
            "looper stopped"
        );
        summary
    }
}

impl Default for Looper {
    fn default() -> Self {
        Self::new()
    }
}

fn execute(action: Action, hooks: &mut [ErrorHook], summary: &mut RunSummary) {
    summary.executed += 1;
    let err = match catch_unwind(AssertUnwindSafe(action)) {
        Ok(Ok(())) => return,
        Ok(Err(err)) => LooperError::Action(err),
        Err(payload) => LooperError::from_panic(payload),
    };
    summary.failed += 1;
    report(hooks, &err);
}

fn report(hooks: &mut [ErrorHook], err: &LooperError) {
    if hooks.is_empty() {
        error!(%err, "unhandled looper failure");
        return;
    }
    for hook in hooks.iter_mut() {
        if catch_unwind(AssertUnwindSafe(|| hook(err))).is_err() {
            error!(%err, "looper error hook panicked");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_returns_when_handles_are_gone() {
        let looper = Looper::new();
        let handle = looper.handle();
        handle.enqueue(|| {}).unwrap();
        drop(handle);

        let summary = looper.run();
        assert_eq!(summary.executed, 1);
        assert_eq!(summary.failed, 0);
    }

    #[test]
    fn failures_without_hooks_are_counted() {
        let looper = Looper::new();
        let handle = looper.handle();
        handle
            .enqueue_fallible(|| Err(anyhow::anyhow!("sensor offline")))
            .unwrap();
        handle.stop();

        assert_eq!(
            looper.run(),
            RunSummary {
                executed: 1,
                failed: 1
            }
        );
    }

    #[test]
    fn panicking_hook_does_not_kill_the_loop() {
        let mut looper = Looper::new();
        looper.on_error(|_| panic!("hook exploded"));
        let handle = looper.handle();
        handle.enqueue(|| panic!("first")).unwrap();
        handle.enqueue(|| {}).unwrap();
        handle.stop();

        let summary = looper.run();
        assert_eq!(summary.executed, 2);
        assert_eq!(summary.failed, 1);
    }
}
