//! CLI-specific error types
//!
//! All CLI errors are fatal for the invocation: printed as `CODE: message`
//! on stderr, exit status 1.

use std::fmt;
use std::io;

use crate::config::ConfigError;
use crate::dataset::DatasetError;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file error
    ConfigError,
    /// Dataset could not be loaded
    DatasetError,
    /// I/O error (stdout, map file)
    IoError,
    /// `--lat/--lon` outside the valid coordinate range
    InvalidLocation,
    /// Config file already exists
    AlreadyInitialized,
    /// HTTP server failed
    ServeFailed,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "REACTOR_CLI_CONFIG_ERROR",
            Self::DatasetError => "REACTOR_CLI_DATASET_ERROR",
            Self::IoError => "REACTOR_CLI_IO_ERROR",
            Self::InvalidLocation => "REACTOR_CLI_INVALID_LOCATION",
            Self::AlreadyInitialized => "REACTOR_CLI_ALREADY_INITIALIZED",
            Self::ServeFailed => "REACTOR_CLI_SERVE_FAILED",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Config error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    /// Dataset error
    pub fn dataset_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::DatasetError, msg)
    }

    /// I/O error
    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    /// Coordinates given on the command line are out of range
    pub fn invalid_location(latitude: f64, longitude: f64) -> Self {
        Self::new(
            CliErrorCode::InvalidLocation,
            format!("Location ({}, {}) is out of range", latitude, longitude),
        )
    }

    /// Config file already present
    pub fn already_initialized(path: impl fmt::Display) -> Self {
        Self::new(
            CliErrorCode::AlreadyInitialized,
            format!("Config file '{}' already exists", path),
        )
    }

    /// Server failure
    pub fn serve_failed(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ServeFailed, msg)
    }

    /// Get the error code
    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        Self::config_error(e.to_string())
    }
}

impl From<DatasetError> for CliError {
    fn from(e: DatasetError) -> Self {
        Self::dataset_error(e.to_string())
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_code() {
        let err = CliError::from(DatasetError::MissingColumn("Latitude"));
        assert_eq!(err.code(), &CliErrorCode::DatasetError);
        assert_eq!(
            err.to_string(),
            "REACTOR_CLI_DATASET_ERROR: Missing required column 'Latitude'"
        );
    }

    #[test]
    fn test_config_error_conversion() {
        let err = CliError::from(ConfigError::Invalid("threshold_km must be >= 0".into()));
        assert_eq!(err.code_str(), "REACTOR_CLI_CONFIG_ERROR");
        assert!(err.message().contains("threshold_km"));
    }
}
