#![deny(missing_docs)]
//! Message dispatchers and their combinators.
//!
//! A [`Dispatcher`] only delivers a message; it queues nothing and never hops
//! threads. Thread affinity is added by composing with [`LoopDispatcher`],
//! which turns each dispatch into an action on a [`looper::Looper`].

/// Buffering dispatcher used to close construction cycles.
pub mod buffer;
/// Fan-out to an ordered list of targets.
pub mod broadcast;
/// Core trait and closure adapter.
pub mod dispatcher;
/// Loop-affine forwarding.
pub mod loop_affine;
/// Message translation.
pub mod map;

pub use crate::broadcast::BroadcastDispatcher;
pub use crate::buffer::BufferDispatcher;
pub use crate::dispatcher::{from_fn, Dispatcher, FnDispatcher};
pub use crate::loop_affine::LoopDispatcher;
pub use crate::map::{DispatcherExt, MapDispatcher};
