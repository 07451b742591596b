// Reconcile interactor - Orchestrates the full reconciliation run

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{info, warn};

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::MatchStrategy;
use crate::domain::usecases::{ReconcileOutcome, ReconcileUseCase};
use crate::ports::*;

/// Run settings taken from configuration
#[derive(Debug, Clone)]
pub struct ReconcileSettings {
    pub parser: ParserOptions,
    pub thumbnail_dir: PathBuf,
    pub clip_dir: PathBuf,
    pub max_parallel_extractions: usize,
    pub extract_timeout: Duration,
}

impl Default for ReconcileSettings {
    fn default() -> Self {
        Self {
            parser: ParserOptions::default(),
            thumbnail_dir: PathBuf::from("thumbnails"),
            clip_dir: PathBuf::from("shots"),
            max_parallel_extractions: 4,
            extract_timeout: Duration::from_secs(30),
        }
    }
}

/// Request for a reconciliation run
#[derive(Debug, Clone)]
pub struct ReconcileRequest {
    pub baselight: PathBuf,
    pub xytech: PathBuf,
    pub video: PathBuf,
    pub output_report: Option<PathBuf>,
    pub output_csv: Option<PathBuf>,
    pub thumbnails: bool,
    pub render_clips: bool,
}

impl ReconcileRequest {
    /// Request without exports or media extraction
    pub fn new(baselight: PathBuf, xytech: PathBuf, video: PathBuf) -> Self {
        Self {
            baselight,
            xytech,
            video,
            output_report: None,
            output_csv: None,
            thumbnails: false,
            render_clips: false,
        }
    }
}

/// Response from a reconciliation run
#[derive(Debug, Clone)]
pub struct ReconcileResponse {
    pub duration_seconds: f64,
    pub outcome: ReconcileOutcome,
    pub rows: Vec<MatchedRow>,
    pub media_failures: usize,
}

/// Interactor for the reconciliation use case
pub struct ReconcileInteractor {
    fs_port: Arc<dyn FsPort>,
    probe_port: Arc<dyn ProbePort>,
    extract_port: Arc<dyn ExtractPort>,
    export_port: Arc<dyn ExportPort>,
    strategy: Arc<dyn MatchStrategy>,
    settings: ReconcileSettings,
}

impl ReconcileInteractor {
    /// Create new reconcile interactor with injected ports
    pub fn new(
        fs_port: Arc<dyn FsPort>,
        probe_port: Arc<dyn ProbePort>,
        extract_port: Arc<dyn ExtractPort>,
        export_port: Arc<dyn ExportPort>,
        strategy: Arc<dyn MatchStrategy>,
        settings: ReconcileSettings,
    ) -> Self {
        Self {
            fs_port,
            probe_port,
            extract_port,
            export_port,
            strategy,
            settings,
        }
    }

    /// Execute the run; only unreadable inputs, the video probe and exports can fail it
    pub async fn execute(&self, request: ReconcileRequest) -> Result<ReconcileResponse, DomainError> {
        info!(
            baselight = %request.baselight.display(),
            xytech = %request.xytech.display(),
            video = %request.video.display(),
            "Starting reconciliation"
        );

        let baselight_lines = self.fs_port.read_lines(&request.baselight).await?;
        let xytech_lines = self.fs_port.read_lines(&request.xytech).await?;

        let duration_seconds = probe_video(&*self.fs_port, &*self.probe_port, &request.video).await?;
        info!(duration_seconds, "Video duration probed");

        let outcome = ReconcileUseCase::new(self.settings.parser.clone(), self.strategy.as_ref())
            .run(baselight_lines.as_slice(), xytech_lines.as_slice(), duration_seconds);
        for coverage in &outcome.coverage {
            info!(filename = %coverage.filename, frames = %coverage.frames, "Valid frame coverage");
        }

        let mut rows: Vec<MatchedRow> = outcome.matched.iter().map(MatchedRow::from_record).collect();
        let mut media_failures = 0;
        if request.thumbnails || request.render_clips {
            media_failures = self
                .attach_media(&mut rows, &request.video, request.thumbnails, request.render_clips)
                .await?;
        }

        if let Some(path) = &request.output_csv {
            self.export_port.write_unused(&outcome.unused, path).await?;
        }
        if let Some(path) = &request.output_report {
            self.export_port.write_matched(&rows, path).await?;
        }

        info!(
            matched = outcome.matched.len(),
            unused = outcome.unused.len(),
            media_failures,
            "Reconciliation completed"
        );

        Ok(ReconcileResponse {
            duration_seconds,
            outcome,
            rows,
            media_failures,
        })
    }

    /// Fill thumbnail and clip paths; a failed item leaves its path empty
    async fn attach_media(
        &self,
        rows: &mut [MatchedRow],
        video: &Path,
        thumbnails: bool,
        render_clips: bool,
    ) -> Result<usize, DomainError> {
        if thumbnails {
            self.fs_port.create_directory(&self.settings.thumbnail_dir).await?;
        }
        if render_clips {
            self.fs_port.create_directory(&self.settings.clip_dir).await?;
        }

        let semaphore = Arc::new(Semaphore::new(self.settings.max_parallel_extractions.max(1)));
        let mut tasks = JoinSet::new();
        let mut failures = 0;

        for (index, row) in rows.iter().enumerate() {
            let interval = match single_interval(&row.frames) {
                Some(interval) => interval,
                None => {
                    warn!(filename = %row.filename, frames = %row.frames, "Error processing frame range");
                    failures += 1;
                    continue;
                }
            };

            let job = MediaJob {
                extract_port: Arc::clone(&self.extract_port),
                video: video.to_path_buf(),
                interval,
                thumbnail_dir: thumbnails.then(|| self.settings.thumbnail_dir.clone()),
                clip_dir: render_clips.then(|| self.settings.clip_dir.clone()),
                timeout: self.settings.extract_timeout,
            };
            let semaphore = Arc::clone(&semaphore);
            tasks.spawn(async move {
                let _permit = semaphore.acquire_owned().await;
                (index, job.run().await)
            });
        }

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, result)) => {
                    failures += result.failures;
                    rows[index].thumbnail = result.thumbnail;
                    rows[index].clip = result.clip;
                }
                Err(e) => {
                    warn!(error = %e, "Media extraction task aborted");
                    failures += 1;
                }
            }
        }

        Ok(failures)
    }
}

/// Probe a video that must exist; a missing file is fatal
pub(crate) async fn probe_video(
    fs_port: &dyn FsPort,
    probe_port: &dyn ProbePort,
    video: &Path,
) -> Result<f64, DomainError> {
    if !fs_port.file_exists(video).await? {
        return Err(DomainError::FileNotFound(video.display().to_string()));
    }
    probe_port.probe_duration(video).await
}

struct MediaJob {
    extract_port: Arc<dyn ExtractPort>,
    video: PathBuf,
    interval: FrameInterval,
    thumbnail_dir: Option<PathBuf>,
    clip_dir: Option<PathBuf>,
    timeout: Duration,
}

#[derive(Default)]
struct MediaResult {
    thumbnail: Option<PathBuf>,
    clip: Option<PathBuf>,
    failures: usize,
}

impl MediaJob {
    async fn run(self) -> MediaResult {
        let mut result = MediaResult::default();

        if let Some(dir) = &self.thumbnail_dir {
            let extraction = self.extract_port.extract_thumbnail(&self.video, self.interval, dir);
            match self.with_timeout(extraction).await {
                Ok(path) => result.thumbnail = Some(path),
                Err(e) => {
                    warn!(frames = %self.interval, error = %e, "Error creating thumbnail");
                    result.failures += 1;
                }
            }
        }

        if let Some(dir) = &self.clip_dir {
            let render = self.extract_port.render_clip(&self.video, self.interval, dir);
            match self.with_timeout(render).await {
                Ok(path) => result.clip = Some(path),
                Err(e) => {
                    warn!(frames = %self.interval, error = %e, "Error rendering shot");
                    result.failures += 1;
                }
            }
        }

        result
    }

    async fn with_timeout<F>(&self, future: F) -> Result<PathBuf, DomainError>
    where
        F: std::future::Future<Output = Result<PathBuf, DomainError>>,
    {
        tokio::time::timeout(self.timeout, future)
            .await
            .map_err(|_| DomainError::Timeout(format!("extraction of frames {}", self.interval)))?
    }
}
