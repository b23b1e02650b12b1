use std::sync::Arc;

use parking_lot::Mutex;
use tracing::warn;

use crate::dispatcher::Dispatcher;

enum BufferState<M> {
    Buffering(Vec<M>),
    Attached(Arc<dyn Dispatcher<M>>),
}

/// Holds messages until the real target exists, then forwards.
///
/// The update cycle needs its render sinks at construction time, while those
/// sinks need a dispatcher leading back to the update cycle. Handing them a
/// buffer and attaching the update cycle afterwards breaks the cycle.
pub struct BufferDispatcher<M> {
    state: Mutex<BufferState<M>>,
}

impl<M> BufferDispatcher<M> {
    /// Creates a detached buffer.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(BufferState::Buffering(Vec::new())),
        }
    }

    /// Attaches `target` and replays buffered messages in arrival order.
    ///
    /// Call it on the thread that dispatches; a message dispatched
    /// concurrently with the replay may overtake buffered ones.
    pub fn setup(&self, target: Arc<dyn Dispatcher<M>>) {
        let pending = {
            let mut state = self.state.lock();
            match std::mem::replace(&mut *state, BufferState::Attached(Arc::clone(&target))) {
                BufferState::Buffering(pending) => pending,
                BufferState::Attached(_) => {
                    warn!("buffer dispatcher attached twice; replacing target");
                    Vec::new()
                }
            }
        };
        for msg in pending {
            target.dispatch(msg);
        }
    }

    /// Releases the attached target, if any.
    ///
    /// Later messages are held again until the next [`setup`](Self::setup).
    pub fn detach(&self) -> Option<Arc<dyn Dispatcher<M>>> {
        let mut state = self.state.lock();
        match std::mem::replace(&mut *state, BufferState::Buffering(Vec::new())) {
            BufferState::Attached(target) => Some(target),
            BufferState::Buffering(pending) => {
                *state = BufferState::Buffering(pending);
                None
            }
        }
    }

    /// Returns true once a target has been attached.
    pub fn is_attached(&self) -> bool {
        matches!(*self.state.lock(), BufferState::Attached(_))
    }

    /// Number of messages waiting for a target.
    pub fn pending(&self) -> usize {
        match &*self.state.lock() {
            BufferState::Buffering(pending) => pending.len(),
            BufferState::Attached(_) => 0,
        }
    }
}

impl<M> Default for BufferDispatcher<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: Send> Dispatcher<M> for BufferDispatcher<M> {
    fn dispatch(&self, msg: M) {
        let target = {
            let mut state = self.state.lock();
            match &mut *state {
                BufferState::Buffering(pending) => {
                    pending.push(msg);
                    return;
                }
                BufferState::Attached(target) => Arc::clone(target),
            }
        };
        target.dispatch(msg);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatcher::from_fn;

    #[test]
    fn replays_buffered_messages_in_order() {
        let buffer = BufferDispatcher::<i32>::new();
        buffer.dispatch(1);
        buffer.dispatch(2);
        assert_eq!(buffer.pending(), 2);
        assert!(!buffer.is_attached());

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        buffer.setup(Arc::new(from_fn(move |n: i32| sink.lock().push(n))));
        buffer.dispatch(3);

        assert!(buffer.is_attached());
        assert_eq!(buffer.pending(), 0);
        assert_eq!(*seen.lock(), vec![1, 2, 3]);

        assert!(buffer.detach().is_some());
        buffer.dispatch(4);
        assert_eq!(buffer.pending(), 1);
        assert_eq!(*seen.lock(), vec![1, 2, 3]);
    }
}
