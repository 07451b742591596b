// Domain errors - Error types for the domain layer

use std::fmt;

/// Domain-specific error types
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Invalid arguments provided
    BadArgs(String),
    /// File not found
    FileNotFound(String),
    /// Invalid input format
    InvalidFormat(String),
    /// Frame interval violates `start <= end`
    InvalidRange(String),
    /// File system operation failed
    FsFail(String),
    /// Duration probe failed
    ProbeFail(String),
    /// Thumbnail or shot extraction failed
    ExtractFail(String),
    /// Report export failed
    ExportFail(String),
    /// External tool did not finish in time
    Timeout(String),
    /// Internal error
    InternalError(String),
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::BadArgs(msg) => write!(f, "Bad arguments: {}", msg),
            DomainError::FileNotFound(msg) => write!(f, "File not found: {}", msg),
            DomainError::InvalidFormat(msg) => write!(f, "Invalid format: {}", msg),
            DomainError::InvalidRange(msg) => write!(f, "Invalid frame range: {}", msg),
            DomainError::FsFail(msg) => write!(f, "File system error: {}", msg),
            DomainError::ProbeFail(msg) => write!(f, "Probe failed: {}", msg),
            DomainError::ExtractFail(msg) => write!(f, "Extraction failed: {}", msg),
            DomainError::ExportFail(msg) => write!(f, "Export failed: {}", msg),
            DomainError::Timeout(msg) => write!(f, "Timed out: {}", msg),
            DomainError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}
