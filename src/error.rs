use std::io;

use thiserror::Error;

/// Every failure a store command can report. None of them leave partial writes behind.
#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Persistence error: {0}")]
    Persistence(String),
}

impl From<io::Error> for TrackerError {
    fn from(e: io::Error) -> Self {
        TrackerError::Persistence(e.to_string())
    }
}

impl From<serde_json::Error> for TrackerError {
    fn from(e: serde_json::Error) -> Self {
        TrackerError::Persistence(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TrackerError>;

/// Rejects empty or whitespace-only values for a named field.
pub(crate) fn require(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(TrackerError::Validation(format!("{} must not be empty", field)));
    }
    Ok(())
}
