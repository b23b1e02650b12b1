use std::io::BufRead;
use std::sync::Arc;

use anyhow::{anyhow, Context as _, Result};
use dispatch::{BroadcastDispatcher, BufferDispatcher, Dispatcher, DispatcherExt, LoopDispatcher};
use futures::future::AbortHandle;
use looper::LooperHandle;
use monitor::{Sample, SensorReader, TemperatureAndHumidityMonitor};
use tea::{Render, Tea};
use tracing::debug;

use crate::console::ConsoleDispatcher;
use crate::message::AppMessage;
use crate::model::AppModel;
use crate::reader::CommandReader;
use crate::render::AppRender;

/// A wired application: update cycle, poller and command reader.
///
/// Dropping it releases the update cycle, which stops the poller's timer.
/// Drop it after the loop has returned.
pub struct App {
    tea: Arc<Tea<AppModel, AppMessage>>,
    buffer: Arc<BufferDispatcher<AppMessage>>,
    dispatcher: Arc<dyn Dispatcher<AppMessage>>,
    shutdown: ShutdownHandle,
}

impl App {
    /// Creates a new builder for constructing an application.
    pub fn builder() -> AppBuilder {
        AppBuilder::new()
    }

    /// Loop-affine entry point; safe to call from any thread.
    pub fn dispatcher(&self) -> Arc<dyn Dispatcher<AppMessage>> {
        Arc::clone(&self.dispatcher)
    }

    /// Copy of the current model.
    pub fn model(&self) -> AppModel {
        self.tea.model()
    }

    /// Handle that ends the command reader and stops the loop.
    pub fn shutdown_handle(&self) -> ShutdownHandle {
        self.shutdown.clone()
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.shutdown.cancel.abort();
        // The render sinks hold dispatchers leading back here.
        if self.buffer.detach().is_none() {
            debug!("application dropped before the update cycle was attached");
        }
    }
}

/// Cancels command reading and asks the loop to exit.
#[derive(Clone, Debug)]
pub struct ShutdownHandle {
    cancel: AbortHandle,
    looper: LooperHandle,
}

impl ShutdownHandle {
    /// Aborts the read loop, then requests a graceful stop.
    pub fn trigger(&self) {
        self.cancel.abort();
        self.looper.stop();
    }
}

/// Builder for assembling an [`App`] from its inputs.
pub struct AppBuilder {
    looper: Option<LooperHandle>,
    input: Option<Box<dyn BufRead + Send>>,
    sensor: Option<Box<dyn SensorReader>>,
    console: Option<Arc<dyn Dispatcher<AppMessage>>>,
    views: Vec<Box<dyn Render<AppModel>>>,
}

impl AppBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self {
            looper: None,
            input: None,
            sensor: None,
            console: None,
            views: Vec::new(),
        }
    }

    /// Loop that runs the update cycle.
    pub fn looper(mut self, looper: LooperHandle) -> Self {
        self.looper = Some(looper);
        self
    }

    /// Source of operator command lines.
    pub fn input<R: BufRead + Send + 'static>(mut self, input: R) -> Self {
        self.input = Some(Box::new(input));
        self
    }

    /// Sensor the poller reads.
    pub fn sensor<R: SensorReader + 'static>(mut self, sensor: R) -> Self {
        self.sensor = Some(Box::new(sensor));
        self
    }

    /// Message log; defaults to standard output.
    pub fn console<D: Dispatcher<AppMessage> + 'static>(mut self, console: D) -> Self {
        self.console = Some(Arc::new(console));
        self
    }

    /// Extra render sink, rendered after the built-in ones.
    pub fn view<R: Render<AppModel> + 'static>(mut self, view: R) -> Self {
        self.views.push(Box::new(view));
        self
    }

    /// Wires the dispatch graph and schedules the initial render.
    pub fn build(self) -> Result<App> {
        let looper = self.looper.ok_or_else(|| anyhow!("missing looper handle"))?;
        let input = self.input.ok_or_else(|| anyhow!("missing command input"))?;
        let sensor = self.sensor.ok_or_else(|| anyhow!("missing sensor reader"))?;
        let console = self.console.unwrap_or_else(|| {
            Arc::new(ConsoleDispatcher::stdout()) as Arc<dyn Dispatcher<AppMessage>>
        });

        let buffer = Arc::new(BufferDispatcher::<AppMessage>::new());
        let fanout = Arc::new(BroadcastDispatcher::new([
            Arc::clone(&buffer) as Arc<dyn Dispatcher<AppMessage>>,
            console,
        ]));
        let dispatcher: Arc<dyn Dispatcher<AppMessage>> =
            Arc::new(LoopDispatcher::new(looper.clone(), fanout));

        let monitor = TemperatureAndHumidityMonitor::new(
            Arc::clone(&dispatcher).wrap(|sample: Sample| AppMessage::from(sample)),
            sensor,
        )
        .context("failed to start the monitor")?;
        let command_reader = CommandReader::new(input, Arc::clone(&dispatcher), looper.clone());
        let cancel = command_reader.cancel_handle();

        let render = AppRender::new(command_reader, monitor).with_views(self.views);
        let tea = Arc::new(Tea::new(AppModel::default(), render));
        buffer.setup(Arc::clone(&tea) as Arc<dyn Dispatcher<AppMessage>>);

        let initial = Arc::clone(&tea);
        looper
            .enqueue(move || initial.render_current())
            .context("looper closed before start-up")?;

        Ok(App {
            tea,
            buffer,
            dispatcher,
            shutdown: ShutdownHandle { cancel, looper },
        })
    }
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}
