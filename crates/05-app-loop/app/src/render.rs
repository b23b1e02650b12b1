use monitor::TemperatureAndHumidityMonitor;
use tea::Render;

use crate::model::AppModel;
use crate::reader::CommandReader;

/// Fans each application model out to the command reader, the monitor and
/// any extra views, in that order.
pub struct AppRender {
    command_reader: CommandReader,
    monitor: TemperatureAndHumidityMonitor,
    views: Vec<Box<dyn Render<AppModel>>>,
}

impl AppRender {
    /// Renders to `command_reader` and `monitor`, with no extra views.
    pub fn new(command_reader: CommandReader, monitor: TemperatureAndHumidityMonitor) -> Self {
        Self {
            command_reader,
            monitor,
            views: Vec::new(),
        }
    }

    /// Appends `views`, rendered after the built-in sinks.
    pub fn with_views(mut self, views: Vec<Box<dyn Render<AppModel>>>) -> Self {
        self.views.extend(views);
        self
    }
}

impl Render<AppModel> for AppRender {
    fn render(&mut self, model: &AppModel) {
        self.command_reader.render(&model.command_reader());
        self.monitor.render(&model.monitor);
        for view in &mut self.views {
            view.render(model);
        }
    }
}
