use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A date-like value that could not be turned into a calendar instant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid date '{input}'")]
pub struct InvalidDateError {
    pub input: String,
}

impl InvalidDateError {
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
        }
    }
}

/// Fatal violation found while validating a config document or spreadsheet.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[derive(Debug, Error)]
pub enum TimelineError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    InvalidDate(#[from] InvalidDateError),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("workbook error: {0}")]
    Workbook(#[from] calamine::Error),
    #[error("xlsx write error: {0}")]
    XlsxWrite(#[from] rust_xlsxwriter::XlsxError),
    #[error("unsupported spreadsheet format: {}", .0.display())]
    UnsupportedFormat(PathBuf),
}

impl TimelineError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        TimelineError::Validation(ValidationError::new(message))
    }

    /// True for errors caused by the content of the input rather than by I/O.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            TimelineError::Validation(_) | TimelineError::InvalidDate(_) | TimelineError::Json(_)
        )
    }
}

pub type TimelineResult<T> = Result<T, TimelineError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("program '{0}' not found")]
    UnknownProgram(String),
    #[error("time point '{time_point_id}' not found in program '{program_id}'")]
    UnknownTimePoint {
        program_id: String,
        time_point_id: String,
    },
}
