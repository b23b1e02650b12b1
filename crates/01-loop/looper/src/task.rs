//! Futures driven by the loop: each wake-up becomes a queued action.

use std::sync::Arc;
use std::task::{Context, Poll};

use futures::future::BoxFuture;
use futures::task::{waker_ref, ArcWake};
use parking_lot::Mutex;
use tracing::trace;

use crate::error::LooperResult;
use crate::handle::LooperHandle;

type TaskFuture = BoxFuture<'static, anyhow::Result<()>>;

pub(crate) struct Task {
    // `None` once the future has completed.
    future: Mutex<Option<TaskFuture>>,
    looper: LooperHandle,
}

impl Task {
    pub(crate) fn spawn(looper: LooperHandle, future: TaskFuture) -> LooperResult<()> {
        let task = Arc::new(Task {
            future: Mutex::new(Some(future)),
            looper,
        });
        task.schedule()
    }

    fn schedule(self: &Arc<Self>) -> LooperResult<()> {
        let task = Arc::clone(self);
        self.looper.submit(Box::new(move || task.poll_once()))
    }

    fn poll_once(self: &Arc<Self>) -> anyhow::Result<()> {
        let mut slot = self.future.lock();
        let Some(mut future) = slot.take() else {
            return Ok(());
        };

        let waker = waker_ref(self);
        let mut cx = Context::from_waker(&waker);
        match future.as_mut().poll(&mut cx) {
            Poll::Pending => {
                *slot = Some(future);
                Ok(())
            }
            Poll::Ready(result) => result,
        }
    }
}

impl ArcWake for Task {
    fn wake_by_ref(arc_self: &Arc<Self>) {
        if arc_self.schedule().is_err() {
            trace!("dropping wake-up for a task on a closed looper");
        }
    }
}
