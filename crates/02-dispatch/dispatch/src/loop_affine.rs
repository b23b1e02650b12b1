use std::sync::Arc;

use looper::LooperHandle;
use tracing::debug;

use crate::dispatcher::Dispatcher;

/// Dispatcher whose target only ever runs on the loop thread.
///
/// `dispatch` captures the message and enqueues the target's `dispatch` as an
/// action. Messages sent from one thread keep their relative order; messages
/// from different threads interleave in whatever order they were enqueued.
pub struct LoopDispatcher<D: ?Sized> {
    looper: LooperHandle,
    target: Arc<D>,
}

impl<D: ?Sized> LoopDispatcher<D> {
    /// Routes dispatches to `target` through `looper`.
    pub fn new(looper: LooperHandle, target: Arc<D>) -> Self {
        Self { looper, target }
    }

    /// Returns the loop this dispatcher posts to.
    pub fn looper(&self) -> &LooperHandle {
        &self.looper
    }
}

impl<D: ?Sized> Clone for LoopDispatcher<D> {
    fn clone(&self) -> Self {
        Self {
            looper: self.looper.clone(),
            target: Arc::clone(&self.target),
        }
    }
}

impl<M, D> Dispatcher<M> for LoopDispatcher<D>
where
    M: Send + 'static,
    D: Dispatcher<M> + ?Sized + 'static,
{
    fn dispatch(&self, msg: M) {
        let target = Arc::clone(&self.target);
        if let Err(err) = self.looper.enqueue(move || target.dispatch(msg)) {
            debug!(%err, "dropping message posted to a closed looper");
        }
    }
}
