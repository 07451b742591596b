// Local filesystem adapter - Reading exports and preparing output directories

use std::io::ErrorKind;
use std::path::Path;

use async_trait::async_trait;

use crate::domain::errors::*;
use crate::ports::*;

/// Filesystem adapter backed by `tokio::fs`
#[derive(Debug, Clone, Default)]
pub struct FsLocalAdapter;

impl FsLocalAdapter {
    /// Create new filesystem adapter
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl FsPort for FsLocalAdapter {
    async fn file_exists(&self, path: &Path) -> Result<bool, DomainError> {
        match tokio::fs::metadata(path).await {
            Ok(metadata) => Ok(metadata.is_file()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(DomainError::FsFail(format!(
                "Failed to stat {}: {}",
                path.display(),
                e
            ))),
        }
    }

    async fn read_lines(&self, path: &Path) -> Result<Vec<String>, DomainError> {
        let bytes = tokio::fs::read(path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => DomainError::FileNotFound(path.display().to_string()),
            _ => DomainError::FsFail(format!("Failed to read {}: {}", path.display(), e)),
        })?;

        // Exports from older tools are not always valid UTF-8
        Ok(String::from_utf8_lossy(&bytes)
            .lines()
            .map(str::to_string)
            .collect())
    }

    async fn create_directory(&self, path: &Path) -> Result<(), DomainError> {
        tokio::fs::create_dir_all(path).await.map_err(|e| {
            DomainError::FsFail(format!(
                "Failed to create directory {}: {}",
                path.display(),
                e
            ))
        })
    }
}
