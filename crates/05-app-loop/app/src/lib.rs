#![deny(missing_docs)]
//! Temperature monitor application wiring.
//!
//! The `app` crate defines the application message and model that wrap the
//! monitor's own types, the command reader that turns operator lines into
//! messages, and [`AppBuilder`], which assembles the dispatch graph:
//!
//! ```text
//! producers ─▶ LoopDispatcher ─▶ Broadcast ─┬▶ Buffer ─▶ Tea ─▶ AppRender
//!                                           └▶ console log
//! ```

/// Graph assembly and the running application handle.
pub mod builder;
/// Operator command protocol.
pub mod command;
/// Message log written to the console.
pub mod console;
/// Top-level application messages.
pub mod message;
/// Top-level application model.
pub mod model;
/// Line-oriented command reader.
pub mod reader;
/// Composite render sink.
pub mod render;

pub use crate::builder::{App, AppBuilder, ShutdownHandle};
pub use crate::command::{parse_command, Command, CommandError};
pub use crate::console::ConsoleDispatcher;
pub use crate::message::AppMessage;
pub use crate::model::{AppModel, CommandReaderModel};
pub use crate::reader::CommandReader;
pub use crate::render::AppRender;
