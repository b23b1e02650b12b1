//! Poller re-arm and sampling.

use std::thread;
use std::time::Duration;

use crossbeam_channel::unbounded;
use dispatch::from_fn;
use monitor::{
    MonitorModel, MonitorStatus, Sample, SensorReader, RelativeHumidity, Temperature,
    TemperatureAndHumidityMonitor, TimerPeriod,
};
use tea::Render;

const WAIT: Duration = Duration::from_secs(5);

struct HalfBrokenSensor;

impl SensorReader for HalfBrokenSensor {
    fn try_read_temperature(&mut self) -> Option<Temperature> {
        Some(Temperature::from_degrees_celsius(19.0))
    }

    fn try_read_humidity(&mut self) -> Option<RelativeHumidity> {
        None
    }
}

fn running(ms: u64) -> MonitorModel {
    MonitorModel::DEFAULT
        .with_status(MonitorStatus::Running)
        .with_interval_time(Some(Duration::from_millis(ms)))
}

#[test]
fn render_derives_the_period_from_the_model() {
    let mut poller =
        TemperatureAndHumidityMonitor::new(from_fn(|_: Sample| {}), HalfBrokenSensor).unwrap();
    assert_eq!(poller.period(), TimerPeriod::Disabled);

    poller.render(&running(500));
    assert_eq!(poller.period(), TimerPeriod::Every(Duration::from_millis(500)));

    poller.render(&running(500).with_status(MonitorStatus::Stopped));
    assert_eq!(poller.period(), TimerPeriod::Disabled);

    poller.render(&running(120));
    assert_eq!(poller.period(), TimerPeriod::Every(Duration::from_millis(120)));
}

#[test]
fn fires_dispatch_samples_with_missing_values() {
    let (tx, rx) = unbounded();
    let dispatcher = from_fn(move |sample: Sample| {
        let _ = tx.send((sample, thread::current().id()));
    });
    let mut poller = TemperatureAndHumidityMonitor::new(dispatcher, HalfBrokenSensor).unwrap();
    poller.render(&running(5));

    let (sample, fired_on) = rx.recv_timeout(WAIT).expect("sample dispatched");
    assert_eq!(
        sample,
        Sample {
            temperature: Some(Temperature::from_degrees_celsius(19.0)),
            humidity: None,
        }
    );
    assert_ne!(fired_on, thread::current().id());

    poller.render(&MonitorModel::DEFAULT);
    thread::sleep(Duration::from_millis(50));
    while rx.try_recv().is_ok() {}
    assert!(rx.recv_timeout(Duration::from_millis(100)).is_err());
}
