//! Error handling module for framerecon adapters

use thiserror::Error;

use crate::domain::errors::DomainError;

/// Adapter-level error type
#[derive(Error, Debug)]
pub enum ReconError {
    /// Input file not found or inaccessible
    #[error("Input file not found: {path}")]
    InputFileNotFound { path: String },

    /// Configuration file could not be parsed or holds bad values
    #[error("Invalid configuration: {message}")]
    ConfigError { message: String },

    /// Report write error
    #[error("Failed to write report: {message}")]
    ExportError { message: String },

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML serialization error
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// TOML parse error
    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),
}

/// Result type alias for adapter operations
pub type ReconResult<T> = std::result::Result<T, ReconError>;

impl From<ReconError> for DomainError {
    fn from(error: ReconError) -> Self {
        match error {
            ReconError::InputFileNotFound { path } => DomainError::FileNotFound(path),
            ReconError::ConfigError { message } => DomainError::BadArgs(message),
            ReconError::ExportError { message } => DomainError::ExportFail(message),
            ReconError::IoError(e) => DomainError::FsFail(e.to_string()),
            ReconError::JsonError(e) => DomainError::ExportFail(e.to_string()),
            ReconError::YamlError(e) => DomainError::ExportFail(e.to_string()),
            ReconError::TomlError(e) => DomainError::BadArgs(e.to_string()),
        }
    }
}
