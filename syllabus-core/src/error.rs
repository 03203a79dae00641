//! Error types for syllabus extraction and calendar serialization.

use thiserror::Error;

/// Errors that can occur in syllabus-core operations.
#[derive(Error, Debug)]
pub enum SyllabusError {
    #[error("Invalid calendar date: {year:04}-{month:02}-{day:02}")]
    InvalidDate { year: i32, month: u32, day: u32 },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown timezone '{0}'")]
    UnknownTimezone(String),

    #[error("Unknown calendar provider '{0}' (expected 'google' or 'outlook')")]
    UnknownProvider(String),

    #[error("Invalid recurrence rule: {0}")]
    InvalidRecurrence(String),

    #[error("ICS parse error: {0}")]
    IcsParse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for syllabus-core operations.
pub type SyllabusResult<T> = Result<T, SyllabusError>;
