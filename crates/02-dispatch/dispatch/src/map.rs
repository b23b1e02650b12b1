use std::marker::PhantomData;

use crate::dispatcher::Dispatcher;

/// Translates messages of type `A` into `M` before forwarding.
///
/// Lets a producer emit its own narrow message type while the consumer
/// expects the application's wrapped type.
pub struct MapDispatcher<D, F, M> {
    inner: D,
    f: F,
    _msg: PhantomData<fn(M)>,
}

impl<D, F, M> MapDispatcher<D, F, M> {
    /// Wraps `inner`, applying `f` to each message.
    pub fn new(inner: D, f: F) -> Self {
        Self {
            inner,
            f,
            _msg: PhantomData,
        }
    }

    /// Returns the wrapped dispatcher.
    pub fn inner(&self) -> &D {
        &self.inner
    }
}

impl<A, M, D, F> Dispatcher<A> for MapDispatcher<D, F, M>
where
    D: Dispatcher<M>,
    F: Fn(A) -> M + Send + Sync,
{
    fn dispatch(&self, msg: A) {
        self.inner.dispatch((self.f)(msg))
    }
}

/// Combinators available on every dispatcher.
pub trait DispatcherExt<M>: Dispatcher<M> + Sized {
    /// Accepts `A` messages, converting them with `f` before dispatching.
    fn wrap<A, F>(self, f: F) -> MapDispatcher<Self, F, M>
    where
        F: Fn(A) -> M + Send + Sync,
    {
        MapDispatcher::new(self, f)
    }
}

impl<M, D: Dispatcher<M>> DispatcherExt<M> for D {}
