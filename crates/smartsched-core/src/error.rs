//! SmartSched error types.

use thiserror::Error;

/// Errors raised anywhere in the scheduler.
#[derive(Debug, Error)]
pub enum SchedError {
    /// Input text did not match the fixed date-time pattern. Holds the rejected text.
    #[error("Invalid date-time format. Expected pattern: dd-MM-yyyy HH:mm")]
    InvalidDateFormat(String),

    #[error("Invalid recurrence type '{0}'. Expected one of NONE / DAILY / WEEKLY / MONTHLY")]
    InvalidRecurrence(String),

    #[error("Task not found: {0}")]
    TaskNotFound(String),

    /// Reading or writing the task file failed.
    #[error("Persistence error: {0}")]
    Persistence(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, SchedError>;
