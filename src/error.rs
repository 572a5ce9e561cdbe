//! Error types for u-timetable.
//!
//! Only structural problems surface as errors. An obligation that cannot be
//! placed is not an error: it is reported in `Schedule::skipped`.

use thiserror::Error;

use crate::validation::ValidationError;

/// Main error type for the timetabling engine.
#[derive(Error, Debug)]
pub enum SchedulerError {
    /// A required input table was never supplied.
    #[error("Missing required table: {0}")]
    MissingTable(&'static str),

    /// Input tables failed structural validation.
    #[error("Invalid input: {} problem(s), first: {}", .0.len(), first_message(.0))]
    Validation(Vec<ValidationError>),

    /// Run parameters are unusable.
    #[error("Configuration error: {0}")]
    InvalidConfig(String),

    /// A time-of-day string is not `HH:MM` or is out of range.
    #[error("Invalid time of day: {0}")]
    InvalidTime(String),

    /// Algorithm selector not recognized.
    #[error("Unknown algorithm: {0}")]
    UnknownAlgorithm(String),

    /// Course type string not recognized.
    #[error("Unknown course type: {0}")]
    UnknownCourseType(String),

    /// Room type string not recognized.
    #[error("Unknown room type: {0}")]
    UnknownRoomType(String),

    /// Day name not recognized.
    #[error("Unknown day: {0}")]
    UnknownDay(String),

    /// Configuration file I/O errors.
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file parse errors.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

fn first_message(errors: &[ValidationError]) -> &str {
    errors.first().map(|e| e.message.as_str()).unwrap_or("none")
}

/// Convenience Result type using [`SchedulerError`].
pub type Result<T> = std::result::Result<T, SchedulerError>;
