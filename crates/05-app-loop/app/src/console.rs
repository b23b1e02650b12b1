use std::fmt;
use std::io::{self, Write};

use dispatch::Dispatcher;
use parking_lot::Mutex;
use tracing::warn;

/// Writes one line per message to an output stream.
pub struct ConsoleDispatcher<W> {
    out: Mutex<W>,
}

impl<W: Write + Send> ConsoleDispatcher<W> {
    /// Logs to `out`.
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    /// Returns the wrapped stream.
    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }
}

impl ConsoleDispatcher<io::Stdout> {
    /// Logs to standard output.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<M: fmt::Display, W: Write + Send> Dispatcher<M> for ConsoleDispatcher<W> {
    fn dispatch(&self, msg: M) {
        let mut out = self.out.lock();
        if let Err(err) = writeln!(out, "{msg}").and_then(|()| out.flush()) {
            warn!(%err, "failed to write message to console");
        }
    }
}
