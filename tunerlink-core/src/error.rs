use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    // Configuration errors
    #[error("Invalid config: {message}")]
    ConfigInvalid { message: String },

    #[error("Failed to parse config file: {0}")]
    ConfigParseError(#[from] toml::de::Error),

    // IO errors
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    // Host errors
    #[error("Host call {operation} failed: {reason}")]
    HostCallFailed {
        operation: &'static str,
        reason: String,
    },

    #[error("Click on {control} failed: {reason}")]
    ClickFailed { control: String, reason: String },

    // Lifecycle errors
    #[error("Readiness signal dropped before the page became interactive")]
    PageNeverReady,

    #[error("Command channel closed")]
    CommandChannelClosed,
}

impl CoreError {
    /// Build a [`CoreError::HostCallFailed`] from any displayable reason.
    pub fn host(operation: &'static str, reason: impl std::fmt::Display) -> Self {
        Self::HostCallFailed {
            operation,
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
