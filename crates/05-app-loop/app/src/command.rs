use std::time::Duration;

use clap::Parser;
use monitor::{MonitorMessage, MonitorStatus};
use thiserror::Error;

use crate::message::AppMessage;

/// One operator command, parsed from a whitespace-separated line.
#[derive(Debug, Clone, PartialEq, Parser)]
#[command(name = "command", no_binary_name = true, disable_version_flag = true)]
pub enum Command {
    /// Sets the polling interval.
    #[command(name = "setMonitorInterval")]
    SetMonitorInterval {
        /// Interval in milliseconds; fractions are accepted.
        #[arg(value_name = "MS", value_parser = parse_interval, allow_negative_numbers = true)]
        interval: Duration,
    },
    /// Starts or stops polling.
    #[command(name = "setMonitorStatus")]
    SetMonitorStatus {
        /// `Running` or `Stopped`, in any case.
        #[arg(value_name = "STATUS")]
        status: MonitorStatus,
    },
}

impl Command {
    /// Message this command dispatches.
    pub fn into_message(self) -> AppMessage {
        let msg = match self {
            Command::SetMonitorInterval { interval } => MonitorMessage::IntervalChanged(interval),
            Command::SetMonitorStatus { status } => MonitorMessage::StatusChanged(status),
        };
        AppMessage::Monitor(msg)
    }
}

/// Rejected command line.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The line held no tokens.
    #[error("empty command line")]
    Empty,
    /// The tokens did not form a known command.
    #[error("{}", .0.render().to_string().trim_end())]
    Invalid(#[from] clap::Error),
}

/// Parses one operator line.
pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let mut tokens = line.split_whitespace().peekable();
    if tokens.peek().is_none() {
        return Err(CommandError::Empty);
    }
    Ok(Command::try_parse_from(tokens)?)
}

fn parse_interval(raw: &str) -> Result<Duration, String> {
    let millis: f64 = raw
        .parse()
        .map_err(|_| format!("`{raw}` is not a number of milliseconds"))?;
    if !millis.is_finite() || millis < 0.0 {
        return Err(format!("interval must be a non-negative number, got `{raw}`"));
    }
    Duration::try_from_secs_f64(millis / 1000.0).map_err(|err| err.to_string())
}
