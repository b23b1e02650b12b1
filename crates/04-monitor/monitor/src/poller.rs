use dispatch::Dispatcher;
use tea::Render;
use tracing::trace;

use crate::error::{MonitorError, MonitorResult};
use crate::message::Sample;
use crate::model::MonitorModel;
use crate::sensor::SensorReader;
use crate::timer::{PeriodicTimer, TimerPeriod};

const TIMER_THREAD_NAME: &str = "monitor-timer";

/// Polls the sensor at the period derived from the last rendered model.
///
/// Samples are dispatched from the timer thread. Give it a loop-affine
/// dispatcher so they are reduced on the loop thread.
pub struct TemperatureAndHumidityMonitor {
    timer: PeriodicTimer,
}

impl TemperatureAndHumidityMonitor {
    /// Builds a disabled poller reading from `reader` and reporting to `dispatcher`.
    pub fn new<D, R>(dispatcher: D, reader: R) -> MonitorResult<Self>
    where
        D: Dispatcher<Sample> + 'static,
        R: SensorReader + 'static,
    {
        let mut reader = reader;
        let timer = PeriodicTimer::new(TIMER_THREAD_NAME, move || {
            let sample = Sample::read(&mut reader);
            trace!(?sample, "sensor polled");
            dispatcher.dispatch(sample);
        })
        .map_err(MonitorError::SpawnTimer)?;
        Ok(Self { timer })
    }

    /// Firing period currently in effect.
    pub fn period(&self) -> TimerPeriod {
        self.timer.period()
    }
}

impl Render<MonitorModel> for TemperatureAndHumidityMonitor {
    fn render(&mut self, model: &MonitorModel) {
        self.timer.change(model.timer_period());
    }
}
