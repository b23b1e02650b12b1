use monitor::MonitorModel;
use tea::Update;

use crate::message::AppMessage;

/// Immutable application state.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AppModel {
    /// Monitor sub-model.
    pub monitor: MonitorModel,
}

impl AppModel {
    /// Copy of `self` with the monitor sub-model replaced.
    pub fn with_monitor(self, monitor: MonitorModel) -> Self {
        Self { monitor, ..self }
    }

    /// View of the model for the command reader.
    pub fn command_reader(&self) -> CommandReaderModel {
        CommandReaderModel { running: true }
    }
}

impl Update<AppMessage> for AppModel {
    fn update(&self, msg: AppMessage) -> Self {
        match msg {
            AppMessage::Monitor(msg) => self.with_monitor(self.monitor.update(msg)),
        }
    }
}

/// What the command reader renders from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandReaderModel {
    /// Whether commands should be read.
    pub running: bool,
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use monitor::{MonitorMessage, MonitorStatus, Sample};

    use super::*;

    #[test]
    fn monitor_messages_update_the_sub_model() {
        let model = AppModel::default()
            .update(AppMessage::from(MonitorMessage::StatusChanged(MonitorStatus::Running)))
            .update(AppMessage::from(MonitorMessage::IntervalChanged(
                Duration::from_millis(250),
            )));
        assert_eq!(model.monitor.status, MonitorStatus::Running);
        assert_eq!(model.monitor.interval_time, Some(Duration::from_millis(250)));
    }

    #[test]
    fn samples_do_not_change_the_model() {
        let model = AppModel::default();
        assert_eq!(model.update(AppMessage::from(Sample::default())), model);
    }

    #[test]
    fn command_reader_is_always_running() {
        assert!(AppModel::default().command_reader().running);
    }
}
