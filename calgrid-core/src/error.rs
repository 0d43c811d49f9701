//! Error types for calgrid.

use thiserror::Error;

/// Errors that can occur in calgrid operations.
#[derive(Error, Debug)]
pub enum CalGridError {
    #[error("{}", .0.join(", "))]
    ValidationFailed(Vec<String>),

    #[error("Slot interval must evenly divide 60 minutes, got {0}")]
    InvalidSlotInterval(u32),

    #[error("No event form is open")]
    ModalClosed,

    #[error("Event not found: {0}")]
    EventNotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl CalGridError {
    /// Validation messages carried by this error, if it is a validation failure.
    pub fn messages(&self) -> &[String] {
        match self {
            CalGridError::ValidationFailed(messages) => messages,
            _ => &[],
        }
    }
}

/// Result type alias for calgrid operations.
pub type CalGridResult<T> = Result<T, CalGridError>;
