//! Dataset load errors
//!
//! Every load error is fatal for the run: no partial dataset is returned.

use thiserror::Error;

/// Result type for dataset operations
pub type DatasetResult<T> = Result<T, DatasetError>;

/// Dataset errors
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Failed to read dataset '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed CSV: {0}")]
    Malformed(String),

    #[error("Missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("Row {row}: column '{column}' is blank")]
    BlankValue { row: usize, column: &'static str },

    #[error("Row {row}: column '{column}' is not a number: '{value}'")]
    InvalidNumber {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("Row {row}: {column} {value} is outside [{min}, {max}]")]
    OutOfRange {
        row: usize,
        column: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

impl DatasetError {
    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            DatasetError::Io { .. } => "REACTOR_DATASET_IO",
            DatasetError::Malformed(_) => "REACTOR_DATASET_MALFORMED",
            DatasetError::MissingColumn(_) => "REACTOR_DATASET_MISSING_COLUMN",
            DatasetError::BlankValue { .. } => "REACTOR_DATASET_BLANK_VALUE",
            DatasetError::InvalidNumber { .. } => "REACTOR_DATASET_INVALID_NUMBER",
            DatasetError::OutOfRange { .. } => "REACTOR_DATASET_OUT_OF_RANGE",
        }
    }
}

impl From<csv::Error> for DatasetError {
    fn from(e: csv::Error) -> Self {
        DatasetError::Malformed(e.to_string())
    }
}
