#![deny(missing_docs)]
//! Temperature and humidity monitor.
//!
//! The monitor is a render sink: every model it is shown re-arms a periodic
//! timer. Each fire happens on the timer's worker thread, reads one sample and
//! dispatches it; callers hand it a loop-affine dispatcher so the sample lands
//! on the loop thread rather than racing the model.

/// Monitor error types.
pub mod error;
/// Messages understood by the monitor model.
pub mod message;
/// Monitor model and reducer.
pub mod model;
/// Timer-driven poller.
pub mod poller;
/// Sensor reader capability and the simulated reader.
pub mod sensor;
/// Re-armable periodic timer.
pub mod timer;
/// Unit newtypes for readings.
pub mod units;

pub use crate::error::{MonitorError, MonitorResult, ParseStatusError};
pub use crate::message::{MonitorMessage, Sample};
pub use crate::model::{MonitorModel, MonitorStatus};
pub use crate::poller::TemperatureAndHumidityMonitor;
pub use crate::sensor::{RandomReader, SensorReader};
pub use crate::timer::{PeriodicTimer, TimerPeriod, MIN_PERIOD};
pub use crate::units::{RelativeHumidity, Temperature};
