use std::io::{self, BufRead};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::Context as _;
use dispatch::Dispatcher;
use futures::channel::mpsc::{self, UnboundedReceiver};
use futures::future::{AbortHandle, AbortRegistration, Abortable};
use futures::{FutureExt, StreamExt};
use looper::LooperHandle;
use monitor::{MonitorMessage, MonitorStatus};
use tea::Render;
use tracing::{debug, error, trace, warn};

use crate::command::parse_command;
use crate::message::AppMessage;
use crate::model::CommandReaderModel;

type LineSource = Box<dyn BufRead + Send>;

/// Reads operator commands and dispatches the resulting messages.
///
/// Lines are pulled by a helper thread so the blocking read never holds up
/// the loop; parsing and dispatch happen in a future running on the loop
/// thread. The read loop starts the first time the reader renders a running
/// model.
pub struct CommandReader {
    input: Option<LineSource>,
    registration: Option<AbortRegistration>,
    cancel: AbortHandle,
    dispatcher: Arc<dyn Dispatcher<AppMessage>>,
    looper: LooperHandle,
    previous: Option<CommandReaderModel>,
}

impl CommandReader {
    /// Reads lines from `input`, posting the read loop to `looper`.
    pub fn new<R>(input: R, dispatcher: Arc<dyn Dispatcher<AppMessage>>, looper: LooperHandle) -> Self
    where
        R: BufRead + Send + 'static,
    {
        let (cancel, registration) = AbortHandle::new_pair();
        Self {
            input: Some(Box::new(input)),
            registration: Some(registration),
            cancel,
            dispatcher,
            looper,
            previous: None,
        }
    }

    /// Handle that ends the read loop at its next await point.
    pub fn cancel_handle(&self) -> AbortHandle {
        self.cancel.clone()
    }

    /// Dispatches an interval change.
    pub fn set_monitor_interval(&self, interval: Duration) {
        self.dispatcher
            .dispatch(MonitorMessage::IntervalChanged(interval).into());
    }

    /// Dispatches a status change.
    pub fn set_monitor_status(&self, status: MonitorStatus) {
        self.dispatcher
            .dispatch(MonitorMessage::StatusChanged(status).into());
    }

    fn start(&mut self) {
        let (Some(input), Some(registration)) = (self.input.take(), self.registration.take()) else {
            debug!("command reader already started");
            return;
        };
        let lines = match spawn_line_source(input) {
            Ok(lines) => lines,
            Err(err) => {
                error!(%err, "failed to spawn command input thread");
                return;
            }
        };
        let task = Abortable::new(read_loop(lines, Arc::clone(&self.dispatcher)), registration).map(
            |outcome| match outcome {
                Ok(result) => result,
                Err(_aborted) => {
                    debug!("command reader cancelled");
                    Ok(())
                }
            },
        );
        if let Err(err) = self.looper.spawn(task) {
            warn!(%err, "failed to schedule command reader");
        }
    }
}

impl Render<CommandReaderModel> for CommandReader {
    fn render(&mut self, model: &CommandReaderModel) {
        let starting = match self.previous.replace(*model) {
            None => model.running,
            Some(previous) => !previous.running && model.running,
        };
        if starting {
            self.start();
        }
    }
}

fn spawn_line_source(input: LineSource) -> io::Result<UnboundedReceiver<io::Result<String>>> {
    let (tx, rx) = mpsc::unbounded();
    thread::Builder::new()
        .name("command-input".into())
        .spawn(move || {
            let mut input = input;
            let mut buf = Vec::new();
            loop {
                buf.clear();
                let line = match input.read_until(b'\n', &mut buf) {
                    Ok(0) => break,
                    Ok(_) => Ok(decode_line(&buf)),
                    Err(err) => Err(err),
                };
                let failed = line.is_err();
                if tx.unbounded_send(line).is_err() || failed {
                    break;
                }
            }
            trace!("command input closed");
        })?;
    Ok(rx)
}

// Invalid UTF-8 becomes U+FFFD so the line is rejected by the parser
// instead of ending the stream.
fn decode_line(raw: &[u8]) -> String {
    let raw = raw.strip_suffix(b"\n").unwrap_or(raw);
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
    String::from_utf8_lossy(raw).into_owned()
}

async fn read_loop(
    mut lines: UnboundedReceiver<io::Result<String>>,
    dispatcher: Arc<dyn Dispatcher<AppMessage>>,
) -> anyhow::Result<()> {
    while let Some(line) = lines.next().await {
        let line = line.context("failed to read command input")?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match parse_command(line) {
            Ok(command) => {
                debug!(?command, "command accepted");
                dispatcher.dispatch(command.into_message());
            }
            Err(err) => warn!(line, %err, "rejected command"),
        }
    }
    debug!("command input exhausted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_line_strips_terminators_and_replaces_bad_bytes() {
        assert_eq!(decode_line(b"setMonitorStatus Running\r\n"), "setMonitorStatus Running");
        assert_eq!(decode_line(b"last line"), "last line");
        assert_eq!(decode_line(b"bad \xff\n"), "bad \u{fffd}");
    }
}
