#![deny(missing_docs)]
//! Single-consumer run-loop.
//!
//! A [`Looper`] owns an unbounded FIFO of deferred actions. Any thread may
//! enqueue through a [`LooperHandle`]; exactly one thread, the one that calls
//! [`Looper::run`], drains the queue and executes the actions one at a time.
//! Everything layered above (loop-affine dispatchers, the update cycle) gets
//! its serialisation from this crate and adds no locking of its own.

mod error;
mod handle;
mod looper;
mod task;

pub use error::{LooperError, LooperResult};
pub use handle::LooperHandle;
pub use looper::{Action, Looper, RunSummary};
