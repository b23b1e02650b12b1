use std::fmt;

use monitor::{MonitorMessage, Sample};

/// Every message the application reduces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AppMessage {
    /// A message for the monitor sub-model.
    Monitor(MonitorMessage),
}

impl From<MonitorMessage> for AppMessage {
    fn from(msg: MonitorMessage) -> Self {
        AppMessage::Monitor(msg)
    }
}

impl From<Sample> for AppMessage {
    fn from(sample: Sample) -> Self {
        AppMessage::Monitor(MonitorMessage::SampleRead(sample))
    }
}

impl fmt::Display for AppMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppMessage::Monitor(msg) => write!(f, "[monitor] {msg}"),
        }
    }
}
