use std::sync::Arc;

use smallvec::SmallVec;

use crate::dispatcher::Dispatcher;

/// Forwards every message to each target, in registration order.
///
/// Delivery is synchronous on the caller's thread. A panicking target
/// propagates to the caller and the remaining targets are skipped.
pub struct BroadcastDispatcher<M> {
    targets: SmallVec<[Arc<dyn Dispatcher<M>>; 4]>,
}

impl<M> BroadcastDispatcher<M> {
    /// Creates a fan-out over `targets`.
    pub fn new<I>(targets: I) -> Self
    where
        I: IntoIterator<Item = Arc<dyn Dispatcher<M>>>,
    {
        Self {
            targets: targets.into_iter().collect(),
        }
    }

    /// Appends a target after the existing ones.
    pub fn push(&mut self, target: Arc<dyn Dispatcher<M>>) {
        self.targets.push(target);
    }

    /// Number of targets.
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// Returns true when there is nothing to forward to.
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

impl<M> Default for BroadcastDispatcher<M> {
    fn default() -> Self {
        Self {
            targets: SmallVec::new(),
        }
    }
}

impl<M: Clone> Dispatcher<M> for BroadcastDispatcher<M> {
    fn dispatch(&self, msg: M) {
        let Some((last, rest)) = self.targets.split_last() else {
            return;
        };
        for target in rest {
            target.dispatch(msg.clone());
        }
        last.dispatch(msg);
    }
}
