//! Re-armable periodic timer backed by a worker thread.

use std::io;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError, Sender};
use tracing::{debug, error, trace, warn};

/// Shortest period the timer fires at; shorter requests are clamped.
pub const MIN_PERIOD: Duration = Duration::from_millis(1);

/// How often a timer fires.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerPeriod {
    /// Never fires.
    #[default]
    Disabled,
    /// Fires once per period.
    Every(Duration),
}

impl TimerPeriod {
    /// The period, or `None` when disabled.
    pub fn as_duration(self) -> Option<Duration> {
        match self {
            TimerPeriod::Disabled => None,
            TimerPeriod::Every(period) => Some(period),
        }
    }

    /// Returns true when the timer fires at all.
    pub fn is_enabled(self) -> bool {
        matches!(self, TimerPeriod::Every(_))
    }
}

/// Periodic timer whose callback runs on the timer's own thread.
///
/// Starts disabled. Each [`PeriodicTimer::change`] re-arms it: the next fire is
/// one full period after the change, even when the period is unchanged.
pub struct PeriodicTimer {
    control: Option<Sender<TimerPeriod>>,
    period: TimerPeriod,
    worker: Option<JoinHandle<()>>,
}

impl PeriodicTimer {
    /// Spawns the worker thread named `name`; `callback` runs on every fire.
    pub fn new<F>(name: &str, callback: F) -> io::Result<Self>
    where
        F: FnMut() + Send + 'static,
    {
        let (control, rx) = unbounded();
        let worker = thread::Builder::new()
            .name(name.to_owned())
            .spawn(move || run_worker(rx, callback))?;
        Ok(Self {
            control: Some(control),
            period: TimerPeriod::Disabled,
            worker: Some(worker),
        })
    }

    /// Re-arms the timer with `period`.
    pub fn change(&mut self, period: TimerPeriod) {
        if period != self.period {
            debug!(?period, "timer period changed");
        }
        self.period = period;
        let Some(control) = &self.control else {
            return;
        };
        if control.send(period).is_err() {
            warn!("timer worker exited; period change ignored");
        }
    }

    /// Period currently in effect.
    pub fn period(&self) -> TimerPeriod {
        self.period
    }
}

impl Drop for PeriodicTimer {
    fn drop(&mut self) {
        self.control.take();
        let Some(worker) = self.worker.take() else {
            return;
        };
        // The last owner may be the callback itself, running on the worker.
        if worker.thread().id() == thread::current().id() {
            return;
        }
        if worker.join().is_err() {
            error!("timer worker panicked");
        }
    }
}

fn run_worker<F: FnMut()>(control: Receiver<TimerPeriod>, mut callback: F) {
    // Next fire time and the period that produced it.
    let mut armed: Option<(Instant, Duration)> = None;

    loop {
        let next = match armed {
            None => control.recv().map_err(|_| RecvTimeoutError::Disconnected),
            Some((deadline, _)) => control.recv_deadline(deadline),
        };

        match next {
            Ok(TimerPeriod::Disabled) => armed = None,
            Ok(TimerPeriod::Every(period)) => {
                let period = period.max(MIN_PERIOD);
                armed = Instant::now()
                    .checked_add(period)
                    .map(|deadline| (deadline, period));
            }
            Err(RecvTimeoutError::Timeout) => {
                let Some((deadline, period)) = armed else {
                    continue;
                };
                trace!(?period, "timer fired");
                fire(&mut callback);
                let now = Instant::now();
                armed = deadline
                    .checked_add(period)
                    .map(|next| if next < now { now + period } else { next })
                    .map(|next| (next, period));
            }
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }
    debug!("timer worker exiting");
}

fn fire<F: FnMut()>(callback: &mut F) {
    if catch_unwind(AssertUnwindSafe(|| callback())).is_err() {
        error!("timer callback panicked; timer keeps running");
    }
}
