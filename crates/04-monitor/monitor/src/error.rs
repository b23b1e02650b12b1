use std::io;

use thiserror::Error;

/// Result alias for fallible monitor construction.
pub type MonitorResult<T> = Result<T, MonitorError>;

/// Failures raised while building the monitor.
#[derive(Debug, Error)]
pub enum MonitorError {
    /// The timer worker thread could not be started.
    #[error("failed to spawn timer thread: {0}")]
    SpawnTimer(#[source] io::Error),
}

/// Rejected monitor status text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown monitor status `{0}` (expected Stopped or Running)")]
pub struct ParseStatusError(pub String);
