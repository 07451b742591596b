//! FFprobe adapter for duration probing
//!
//! Runs the `ffprobe` binary and reads the container duration from its output.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::domain::errors::*;
use crate::ports::*;

/// FFprobe-based probe adapter
pub struct FFprobeAdapter {
    ffprobe_path: PathBuf,
    timeout: Duration,
}

impl FFprobeAdapter {
    /// Create new FFprobe adapter
    pub fn new(ffprobe_path: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            ffprobe_path: ffprobe_path.into(),
            timeout,
        }
    }

    fn command(&self, video: &Path) -> Command {
        let mut command = Command::new(&self.ffprobe_path);
        command
            .args([
                "-v",
                "error",
                "-show_entries",
                "format=duration",
                "-of",
                "default=noprint_wrappers=1:nokey=1",
                "-i",
            ])
            .arg(video)
            .stdin(Stdio::null())
            .kill_on_drop(true);
        command
    }
}

/// Duration in seconds from ffprobe's bare output; `None` for `N/A` or garbage
pub fn parse_duration_output(stdout: &str) -> Option<f64> {
    let value: f64 = stdout.lines().next()?.trim().parse().ok()?;
    if value.is_finite() {
        Some(value)
    } else {
        None
    }
}

#[async_trait]
impl ProbePort for FFprobeAdapter {
    async fn probe_duration(&self, video: &Path) -> Result<f64, DomainError> {
        debug!(video = %video.display(), "Probing video duration");

        let output = tokio::time::timeout(self.timeout, self.command(video).output())
            .await
            .map_err(|_| {
                DomainError::Timeout(format!("ffprobe did not finish for {}", video.display()))
            })?
            .map_err(|e| {
                DomainError::ProbeFail(format!(
                    "Failed to run {}: {}",
                    self.ffprobe_path.display(),
                    e
                ))
            })?;

        if !output.status.success() {
            return Err(DomainError::ProbeFail(format!(
                "ffprobe exited with {} for {}: {}",
                output.status,
                video.display(),
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        match parse_duration_output(&stdout) {
            Some(seconds) => Ok(seconds),
            None => {
                warn!(video = %video.display(), output = %stdout.trim(), "Error extracting video length");
                Ok(0.0)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_duration_output() {
        assert_eq!(parse_duration_output("10.000000\n"), Some(10.0));
        assert_eq!(parse_duration_output("  5.5  "), Some(5.5));
        assert_eq!(parse_duration_output("N/A\n"), None);
        assert_eq!(parse_duration_output(""), None);
        assert_eq!(parse_duration_output("inf"), None);
    }

    #[tokio::test]
    async fn test_missing_binary_is_probe_failure() {
        let adapter = FFprobeAdapter::new(
            "/nonexistent/framerecon-ffprobe",
            Duration::from_secs(5),
        );
        let result = adapter.probe_duration(Path::new("video.mov")).await;
        assert!(matches!(result, Err(DomainError::ProbeFail(_))));
    }
}
