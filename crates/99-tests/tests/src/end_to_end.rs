use std::io::{self, Cursor, Write};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use app::{App, AppModel, ConsoleDispatcher};
use looper::Looper;
use monitor::{MonitorStatus, RandomReader, TimerPeriod};
use parking_lot::Mutex;
use tea::render_fn;

const WAIT: Duration = Duration::from_secs(5);

#[derive(Clone, Default)]
struct SharedLog(Arc<Mutex<Vec<u8>>>);

impl SharedLog {
    fn lines(&self) -> Vec<String> {
        String::from_utf8_lossy(&self.0.lock())
            .lines()
            .map(str::to_owned)
            .collect()
    }
}

impl Write for SharedLog {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn wait_for(log: &SharedLog, predicate: impl Fn(&[String]) -> bool) -> Vec<String> {
    let deadline = Instant::now() + WAIT;
    loop {
        let lines = log.lines();
        if predicate(&lines) || Instant::now() >= deadline {
            return lines;
        }
        thread::sleep(Duration::from_millis(5));
    }
}

fn samples(lines: &[String]) -> usize {
    lines
        .iter()
        .filter(|line| line.starts_with("[monitor] sample read: temperature "))
        .count()
}

#[test]
fn commands_drive_the_poller_and_samples_reach_the_log() {
    let looper = Looper::new();
    let log = SharedLog::default();
    let models = Arc::new(Mutex::new(Vec::new()));
    let recorded = Arc::clone(&models);
    let app = App::builder()
        .looper(looper.handle())
        .input(Cursor::new(
            "setMonitorInterval 20\nnot a command\nsetMonitorStatus running\n",
        ))
        .sensor(RandomReader::seeded(11))
        .console(ConsoleDispatcher::new(log.clone()))
        .view(render_fn(move |model: &AppModel| recorded.lock().push(*model)))
        .build()
        .expect("build");
    let shutdown = app.shutdown_handle();
    let worker = thread::spawn(move || looper.run());

    let lines = wait_for(&log, |lines| samples(lines) >= 3);
    shutdown.trigger();
    let summary = worker.join().unwrap();

    assert_eq!(summary.failed, 0);
    assert!(samples(&lines) >= 3, "log: {lines:#?}");
    assert_eq!(lines[0], "[monitor] interval changed to 20ms");
    assert_eq!(lines[1], "[monitor] status changed to Running");
    assert!(samples(&lines[2..]) == lines.len() - 2, "log: {lines:#?}");

    let model = app.model();
    assert_eq!(model.monitor.status, MonitorStatus::Running);
    assert_eq!(
        model.monitor.timer_period(),
        TimerPeriod::Every(Duration::from_millis(20))
    );

    let models = models.lock();
    // Initial render, then one per message.
    assert!(models.len() >= 2 + 3 + 1, "renders: {}", models.len());
    assert_eq!(models[0], AppModel::default());
}

#[test]
fn stopping_the_monitor_silences_the_log() {
    let looper = Looper::new();
    let log = SharedLog::default();
    let app = App::builder()
        .looper(looper.handle())
        .input(Cursor::new("setMonitorStatus Running\nsetMonitorInterval 10\n"))
        .sensor(RandomReader::seeded(12))
        .console(ConsoleDispatcher::new(log.clone()))
        .build()
        .expect("build");
    let dispatcher = app.dispatcher();
    let shutdown = app.shutdown_handle();
    let worker = thread::spawn(move || looper.run());

    wait_for(&log, |lines| samples(lines) >= 2);
    dispatcher.dispatch(monitor::MonitorMessage::StatusChanged(MonitorStatus::Stopped).into());
    let lines = wait_for(&log, |lines| {
        lines.iter().any(|line| line == "[monitor] status changed to Stopped")
    });
    let stopped_at = lines
        .iter()
        .position(|line| line == "[monitor] status changed to Stopped")
        .expect("stop logged");

    // A fire already in flight may still land right after the stop.
    thread::sleep(Duration::from_millis(100));
    let settled = log.lines();
    thread::sleep(Duration::from_millis(100));
    let later = log.lines();
    shutdown.trigger();
    worker.join().unwrap();

    assert!(samples(&lines[..stopped_at]) >= 2);
    assert_eq!(settled, later, "samples kept arriving after stop");
    assert_eq!(app.model().monitor.status, MonitorStatus::Stopped);
}
