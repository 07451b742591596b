// Validate interactor - Classifies Baselight ranges without matching or exporting

use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use crate::app::reconcile_interactor::probe_video;
use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::PositionalMatch;
use crate::domain::usecases::{ReconcileOutcome, ReconcileUseCase};
use crate::ports::*;

/// Where the video length comes from
#[derive(Debug, Clone, PartialEq)]
pub enum DurationSource {
    /// Probe this video file
    Video(PathBuf),
    /// Use a known duration in seconds
    Seconds(f64),
}

/// Request for range validation
#[derive(Debug, Clone)]
pub struct ValidateRequest {
    pub baselight: PathBuf,
    pub duration: DurationSource,
}

/// Response from range validation
#[derive(Debug, Clone)]
pub struct ValidateResponse {
    pub duration_seconds: f64,
    pub outcome: ReconcileOutcome,
}

/// Interactor for range validation
pub struct ValidateInteractor {
    fs_port: Arc<dyn FsPort>,
    probe_port: Arc<dyn ProbePort>,
    parser: ParserOptions,
}

impl ValidateInteractor {
    pub fn new(fs_port: Arc<dyn FsPort>, probe_port: Arc<dyn ProbePort>, parser: ParserOptions) -> Self {
        Self {
            fs_port,
            probe_port,
            parser,
        }
    }

    pub async fn execute(&self, request: ValidateRequest) -> Result<ValidateResponse, DomainError> {
        let lines = self.fs_port.read_lines(&request.baselight).await?;

        let duration_seconds = match &request.duration {
            DurationSource::Video(video) => {
                probe_video(&*self.fs_port, &*self.probe_port, video).await?
            }
            DurationSource::Seconds(seconds) => *seconds,
        };

        let no_orders: [String; 0] = [];
        let outcome = ReconcileUseCase::new(self.parser.clone(), &PositionalMatch).run(
            lines.as_slice(),
            &no_orders[..],
            duration_seconds,
        );

        info!(
            valid = outcome.validation.valid.len(),
            invalid = outcome.validation.invalid.len(),
            "Validation completed"
        );
        Ok(ValidateResponse {
            duration_seconds,
            outcome,
        })
    }
}
