use thiserror::Error;

/// Result alias used by the looper API.
pub type LooperResult<T> = Result<T, LooperError>;

/// Failures surfaced by the run-loop.
#[derive(Debug, Error)]
pub enum LooperError {
    /// An action panicked while running on the loop thread.
    #[error("action panicked: {message}")]
    Panicked {
        /// Panic payload rendered as text, when it was a string.
        message: String,
    },

    /// A fallible action or spawned task returned an error.
    #[error("action failed: {0:#}")]
    Action(#[source] anyhow::Error),

    /// The loop has been torn down and no longer accepts work.
    #[error("looper is closed")]
    Closed,
}

impl LooperError {
    pub(crate) fn from_panic(payload: Box<dyn std::any::Any + Send>) -> Self {
        let message = if let Some(text) = payload.downcast_ref::<&'static str>() {
            (*text).to_owned()
        } else if let Some(text) = payload.downcast_ref::<String>() {
            text.clone()
        } else {
            "non-string panic payload".to_owned()
        };
        LooperError::Panicked { message }
    }
}
