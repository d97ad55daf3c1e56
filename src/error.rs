use crate::geocoding::GeocodeError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProcessingError>;

#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("File '{}' does not exist.", .path.display())]
    InputNotFound { path: PathBuf },

    #[error("File '{}' already exists.", .path.display())]
    OutputAlreadyExists { path: PathBuf },

    #[error("Column name '{column}' does not exist in '{}'.", .path.display())]
    ColumnNotFound { column: String, path: PathBuf },

    #[error("Reverse geocoding failed: {0}")]
    Geocoding(#[from] GeocodeError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration source error: {0}")]
    ConfigSource(#[from] ::config::ConfigError),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Invalid data format: {0}")]
    InvalidFormat(String),
}

impl ProcessingError {
    /// True for errors raised by the external lookup service mid-run.
    pub fn is_external_failure(&self) -> bool {
        matches!(self, ProcessingError::Geocoding(_))
    }
}
