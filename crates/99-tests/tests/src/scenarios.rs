use std::io::{self, Cursor};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use app::{App, AppMessage, AppModel, ConsoleDispatcher};
use dispatch::{from_fn, Dispatcher, LoopDispatcher};
use looper::Looper;
use monitor::{
    MonitorMessage, MonitorModel, MonitorStatus, RandomReader, Sample, Temperature,
    TemperatureAndHumidityMonitor, TimerPeriod,
};
use parking_lot::Mutex;
use tea::{render_fn, Render, Tea};

struct MonitorProbe {
    poller: TemperatureAndHumidityMonitor,
    seen: Arc<Mutex<Vec<(MonitorModel, TimerPeriod)>>>,
}

impl Render<MonitorModel> for MonitorProbe {
    fn render(&mut self, model: &MonitorModel) {
        self.poller.render(model);
        self.seen.lock().push((*model, self.poller.period()));
    }
}

#[test]
fn status_then_interval_arms_the_poller() {
    let looper = Looper::new();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let poller = TemperatureAndHumidityMonitor::new(from_fn(|_: Sample| {}), RandomReader::seeded(3))
        .expect("poller");
    let tea = Arc::new(Tea::new(
        MonitorModel::DEFAULT,
        MonitorProbe {
            poller,
            seen: Arc::clone(&seen),
        },
    ));
    let dispatcher = LoopDispatcher::new(looper.handle(), Arc::clone(&tea));

    dispatcher.dispatch(MonitorMessage::StatusChanged(MonitorStatus::Running));
    dispatcher.dispatch(MonitorMessage::IntervalChanged(Duration::from_millis(250)));
    looper.handle().stop();
    let summary = looper.run();

    assert_eq!(summary.failed, 0);
    let expected = MonitorModel::DEFAULT
        .with_status(MonitorStatus::Running)
        .with_interval_time(Some(Duration::from_millis(250)));
    assert_eq!(tea.model(), expected);

    let seen = seen.lock();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0].1, TimerPeriod::Disabled);
    assert_eq!(seen[1], (expected, TimerPeriod::Every(Duration::from_millis(250))));
}

#[test]
fn concurrent_sample_producers_lose_nothing() {
    const PER_PRODUCER: usize = 500;

    let looper = Looper::new();
    let handle = looper.handle();
    let renders = Arc::new(AtomicUsize::new(0));
    let rendering = Arc::new(AtomicBool::new(false));
    let render = {
        let renders = Arc::clone(&renders);
        let rendering = Arc::clone(&rendering);
        render_fn(move |model: &AppModel| {
            assert!(!rendering.swap(true, Ordering::SeqCst), "render re-entered");
            assert_eq!(*model, AppModel::default());
            renders.fetch_add(1, Ordering::SeqCst);
            rendering.store(false, Ordering::SeqCst);
        })
    };
    let tea = Arc::new(Tea::<AppModel, AppMessage>::new(AppModel::default(), render));
    let worker = thread::spawn(move || looper.run());

    let producers: Vec<_> = (0..2)
        .map(|producer| {
            let dispatcher = LoopDispatcher::new(handle.clone(), Arc::clone(&tea));
            thread::spawn(move || {
                for idx in 0..PER_PRODUCER {
                    let celsius = (producer * PER_PRODUCER + idx) as f64;
                    dispatcher.dispatch(AppMessage::from(Sample {
                        temperature: Some(Temperature::from_degrees_celsius(celsius)),
                        humidity: None,
                    }));
                }
            })
        })
        .collect();
    for producer in producers {
        producer.join().unwrap();
    }
    handle.stop();
    let summary = worker.join().unwrap();

    assert_eq!(summary.failed, 0);
    assert_eq!(summary.executed, 2 * PER_PRODUCER as u64);
    assert_eq!(renders.load(Ordering::SeqCst), 2 * PER_PRODUCER);
}

#[test]
fn stop_runs_messages_already_queued() {
    let looper = Looper::new();
    let app = App::builder()
        .looper(looper.handle())
        .input(Cursor::new(Vec::new()))
        .sensor(RandomReader::seeded(5))
        .console(ConsoleDispatcher::new(io::sink()))
        .build()
        .expect("build");

    let dispatcher = app.dispatcher();
    dispatcher.dispatch(MonitorMessage::IntervalChanged(Duration::from_secs(60)).into());
    dispatcher.dispatch(MonitorMessage::StatusChanged(MonitorStatus::Running).into());
    dispatcher.dispatch(MonitorMessage::StatusChanged(MonitorStatus::Stopped).into());
    app.shutdown_handle().trigger();

    let summary = looper.run();
    assert_eq!(summary.failed, 0);
    assert_eq!(
        app.model().monitor,
        MonitorModel::DEFAULT.with_interval_time(Some(Duration::from_secs(60)))
    );
}
