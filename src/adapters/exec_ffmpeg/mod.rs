//! FFmpeg execution adapter
//!
//! Extracts thumbnails and renders shots by running the `ffmpeg` binary.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::domain::errors::*;
use crate::domain::model::FrameInterval;
use crate::ports::*;
use crate::utils::time::{frame_to_seconds, seek_argument};

/// FFmpeg-based execution adapter
pub struct FFmpegAdapter {
    ffmpeg_path: PathBuf,
    thumbnail_width: u32,
    thumbnail_height: u32,
}

impl FFmpegAdapter {
    /// Create new FFmpeg adapter
    pub fn new(ffmpeg_path: impl Into<PathBuf>, thumbnail_width: u32, thumbnail_height: u32) -> Self {
        Self {
            ffmpeg_path: ffmpeg_path.into(),
            thumbnail_width,
            thumbnail_height,
        }
    }

    /// Arguments and destination for a middle-frame thumbnail
    pub fn thumbnail_args(
        &self,
        video: &Path,
        interval: FrameInterval,
        output_dir: &Path,
    ) -> (Vec<OsString>, PathBuf) {
        let middle = interval.middle_frame();
        let output = output_dir.join(format!("thumb_{}.jpg", middle));
        let scale = format!(
            "scale={}:{}:force_original_aspect_ratio=decrease",
            self.thumbnail_width, self.thumbnail_height
        );

        let args = vec![
            OsString::from("-v"),
            OsString::from("error"),
            OsString::from("-ss"),
            OsString::from(seek_argument(middle)),
            OsString::from("-i"),
            video.as_os_str().to_owned(),
            OsString::from("-frames:v"),
            OsString::from("1"),
            OsString::from("-vf"),
            OsString::from(scale),
            OsString::from("-y"),
            output.as_os_str().to_owned(),
        ];
        (args, output)
    }

    /// Arguments and destination for a rendered shot
    pub fn clip_args(
        &self,
        video: &Path,
        interval: FrameInterval,
        output_dir: &Path,
    ) -> (Vec<OsString>, PathBuf) {
        let output = output_dir.join(format!("shot_{}_{}.mp4", interval.start, interval.end));
        let duration = frame_to_seconds(interval.end - interval.start);

        let args = vec![
            OsString::from("-v"),
            OsString::from("error"),
            OsString::from("-ss"),
            OsString::from(seek_argument(interval.start)),
            OsString::from("-i"),
            video.as_os_str().to_owned(),
            OsString::from("-t"),
            OsString::from(format!("{:.3}", duration)),
            OsString::from("-y"),
            output.as_os_str().to_owned(),
        ];
        (args, output)
    }

    async fn run(&self, args: Vec<OsString>, output: PathBuf) -> Result<PathBuf, DomainError> {
        debug!(output = %output.display(), "Running ffmpeg");

        let result = Command::new(&self.ffmpeg_path)
            .args(&args)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| {
                DomainError::ExtractFail(format!(
                    "Failed to run {}: {}",
                    self.ffmpeg_path.display(),
                    e
                ))
            })?;

        if !result.status.success() {
            return Err(DomainError::ExtractFail(format!(
                "ffmpeg exited with {}: {}",
                result.status,
                String::from_utf8_lossy(&result.stderr).trim()
            )));
        }
        if !tokio::fs::try_exists(&output).await.unwrap_or(false) {
            return Err(DomainError::ExtractFail(format!(
                "ffmpeg reported success but {} was not written",
                output.display()
            )));
        }

        Ok(output)
    }
}

#[async_trait]
impl ExtractPort for FFmpegAdapter {
    async fn extract_thumbnail(
        &self,
        video: &Path,
        interval: FrameInterval,
        output_dir: &Path,
    ) -> Result<PathBuf, DomainError> {
        let (args, output) = self.thumbnail_args(video, interval, output_dir);
        self.run(args, output).await
    }

    async fn render_clip(
        &self,
        video: &Path,
        interval: FrameInterval,
        output_dir: &Path,
    ) -> Result<PathBuf, DomainError> {
        let (args, output) = self.clip_args(video, interval, output_dir);
        self.run(args, output).await
    }
}
