use std::result::Result as StdResult;

use thiserror::Error;

use crate::domain::{FormError, ParseCodeError};
use crate::estimator::EstimateError;

/// Unified error type for the directory, its services, and storage.
#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("School not found: {0}")]
    SchoolNotFound(String),
    #[error("Consultation not found: {0}")]
    ConsultationNotFound(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Unknown content key: {0}")]
    InvalidContentKey(String),
    #[error("Persistence error: {0}")]
    StorageError(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

pub type Result<T> = StdResult<T, DirectoryError>;

/// User-facing CLI error wrapper.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] DirectoryError),
    #[error("{0}")]
    Command(String),
    #[error("Terminal error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<std::io::Error> for DirectoryError {
    fn from(err: std::io::Error) -> Self {
        DirectoryError::StorageError(err.to_string())
    }
}

impl From<serde_json::Error> for DirectoryError {
    fn from(err: serde_json::Error) -> Self {
        DirectoryError::StorageError(err.to_string())
    }
}

impl From<EstimateError> for DirectoryError {
    fn from(err: EstimateError) -> Self {
        match err {
            EstimateError::InvalidArgument(message) => DirectoryError::InvalidArgument(message),
        }
    }
}

impl From<FormError> for DirectoryError {
    fn from(err: FormError) -> Self {
        DirectoryError::InvalidInput(err.to_string())
    }
}

impl From<ParseCodeError> for DirectoryError {
    fn from(err: ParseCodeError) -> Self {
        DirectoryError::InvalidInput(err.to_string())
    }
}
