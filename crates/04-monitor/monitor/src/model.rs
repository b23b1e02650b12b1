//! Monitor state and its pure reducer.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use tea::Update;

use crate::error::ParseStatusError;
use crate::message::MonitorMessage;
use crate::timer::TimerPeriod;

/// Whether the monitor is polling.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MonitorStatus {
    /// Timer disabled.
    #[default]
    Stopped,
    /// Timer fires every interval.
    Running,
}

impl fmt::Display for MonitorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonitorStatus::Stopped => f.write_str("Stopped"),
            MonitorStatus::Running => f.write_str("Running"),
        }
    }
}

impl FromStr for MonitorStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("running") {
            Ok(MonitorStatus::Running)
        } else if s.eq_ignore_ascii_case("stopped") || s.eq_ignore_ascii_case("stop") {
            Ok(MonitorStatus::Stopped)
        } else {
            Err(ParseStatusError(s.to_owned()))
        }
    }
}

/// Immutable snapshot of the monitor.
///
/// Updates build a new value through the `with_*` constructors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonitorModel {
    /// Current status.
    pub status: MonitorStatus,
    /// Polling interval; `None` is an infinite interval.
    pub interval_time: Option<Duration>,
}

impl MonitorModel {
    /// Stopped, with an infinite interval.
    pub const DEFAULT: MonitorModel = MonitorModel {
        status: MonitorStatus::Stopped,
        interval_time: None,
    };

    /// Copy of `self` with `status` replaced.
    pub fn with_status(self, status: MonitorStatus) -> Self {
        Self { status, ..self }
    }

    /// Copy of `self` with `interval_time` replaced.
    pub fn with_interval_time(self, interval_time: Option<Duration>) -> Self {
        Self {
            interval_time,
            ..self
        }
    }

    /// Firing period the poller's timer should use for this model.
    pub fn timer_period(&self) -> TimerPeriod {
        match (self.status, self.interval_time) {
            (MonitorStatus::Running, Some(interval)) => TimerPeriod::Every(interval),
            (MonitorStatus::Running, None) | (MonitorStatus::Stopped, _) => TimerPeriod::Disabled,
        }
    }
}

impl Default for MonitorModel {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl Update<MonitorMessage> for MonitorModel {
    fn update(&self, msg: MonitorMessage) -> Self {
        match msg {
            MonitorMessage::IntervalChanged(interval) => self.with_interval_time(Some(interval)),
            MonitorMessage::StatusChanged(status) => self.with_status(status),
            // Samples are shown by other sinks; the model does not track them.
            MonitorMessage::SampleRead(_) => *self,
        }
    }
}
