use std::fmt;
use std::sync::Arc;

/// Capability that accepts a message and reacts to it.
///
/// Implementations deliver synchronously on the caller's thread. They are
/// `Send + Sync` so they can be captured by actions queued on a looper.
pub trait Dispatcher<M>: Send + Sync {
    /// Delivers `msg`.
    fn dispatch(&self, msg: M);
}

impl<M, D> Dispatcher<M> for &D
where
    D: Dispatcher<M> + ?Sized,
{
    fn dispatch(&self, msg: M) {
        (**self).dispatch(msg)
    }
}

impl<M, D> Dispatcher<M> for Box<D>
where
    D: Dispatcher<M> + ?Sized,
{
    fn dispatch(&self, msg: M) {
        (**self).dispatch(msg)
    }
}

impl<M, D> Dispatcher<M> for Arc<D>
where
    D: Dispatcher<M> + ?Sized,
{
    fn dispatch(&self, msg: M) {
        (**self).dispatch(msg)
    }
}

/// Dispatcher backed by a closure. Built with [`from_fn`].
#[derive(Clone)]
pub struct FnDispatcher<F> {
    f: F,
}

/// Adapts a closure into a [`Dispatcher`].
pub fn from_fn<M, F>(f: F) -> FnDispatcher<F>
where
    F: Fn(M) + Send + Sync,
{
    FnDispatcher { f }
}

impl<M, F> Dispatcher<M> for FnDispatcher<F>
where
    F: Fn(M) + Send + Sync,
{
    fn dispatch(&self, msg: M) {
        (self.f)(msg)
    }
}

impl<F> fmt::Debug for FnDispatcher<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnDispatcher")
    }
}
