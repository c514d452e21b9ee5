//! Error types for the logger

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// A configuration value or call argument was rejected
    #[error("Invalid argument for {component}: {message}")]
    InvalidArgument { component: String, message: String },

    /// The sink is in a state that does not allow the requested operation
    #[error("Sink error for '{sink}': {message}")]
    SinkState { sink: String, message: String },

    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON parse error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl LoggerError {
    /// Create an invalid argument error
    pub fn invalid_argument(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidArgument {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a sink state error
    pub fn sink_state(sink: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::SinkState {
            sink: sink.into(),
            message: message.into(),
        }
    }

    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    #[must_use]
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, LoggerError::InvalidArgument { .. })
    }

    /// True for errors raised by `close`/`reopen` or a write to a closed sink
    #[must_use]
    pub fn is_sink_state(&self) -> bool {
        matches!(self, LoggerError::SinkState { .. })
    }
}
