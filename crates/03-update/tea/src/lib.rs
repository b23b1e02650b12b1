#![deny(missing_docs)]
//! Unidirectional update cycle: message → reducer → model → render.
//!
//! [`Tea`] owns the current model. Each dispatched message is reduced into a
//! new model which is then handed to the render sink. The cycle itself does no
//! thread checks; callers drive it from a single loop thread by routing every
//! producer through a `dispatch::LoopDispatcher`.

/// Render sinks.
pub mod render;
/// The update cycle engine.
pub mod tea;
/// Pure model reduction.
pub mod update;

pub use crate::render::{render_fn, FnRender, NoneRender, Render};
pub use crate::tea::{Reducer, Tea};
pub use crate::update::Update;
