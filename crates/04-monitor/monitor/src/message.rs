use std::fmt;
use std::time::Duration;

use crate::model::MonitorStatus;
use crate::sensor::SensorReader;
use crate::units::{RelativeHumidity, Temperature};

/// One poll of the sensor. A failed read leaves the field empty.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Sample {
    /// Temperature, if the read succeeded.
    pub temperature: Option<Temperature>,
    /// Humidity, if the read succeeded.
    pub humidity: Option<RelativeHumidity>,
}

impl Sample {
    /// Reads both values from `reader`.
    pub fn read<R: SensorReader + ?Sized>(reader: &mut R) -> Self {
        Self {
            temperature: reader.try_read_temperature(),
            humidity: reader.try_read_humidity(),
        }
    }
}

/// Messages for the monitor model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MonitorMessage {
    /// The operator changed the polling interval.
    IntervalChanged(Duration),
    /// The operator started or stopped monitoring.
    StatusChanged(MonitorStatus),
    /// The poller produced a sample.
    SampleRead(Sample),
}

impl From<Sample> for MonitorMessage {
    fn from(sample: Sample) -> Self {
        MonitorMessage::SampleRead(sample)
    }
}

impl fmt::Display for Sample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.temperature {
            Some(temperature) => write!(f, "temperature {temperature}")?,
            None => f.write_str("temperature n/a")?,
        }
        match self.humidity {
            Some(humidity) => write!(f, ", humidity {humidity}"),
            None => f.write_str(", humidity n/a"),
        }
    }
}

impl fmt::Display for MonitorMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonitorMessage::IntervalChanged(interval) => write!(f, "interval changed to {interval:?}"),
            MonitorMessage::StatusChanged(status) => write!(f, "status changed to {status}"),
            MonitorMessage::SampleRead(sample) => write!(f, "sample read: {sample}"),
        }
    }
}
