use std::sync::Arc;
use std::time::Duration;

use crate::adapters::{
    AppConfig, FFmpegAdapter, FFprobeAdapter, FsLocalAdapter, ReportExportAdapter,
};
use crate::app::reconcile_interactor::{ReconcileInteractor, ReconcileSettings};
use crate::app::validate_interactor::ValidateInteractor;
use crate::domain::errors::DomainError;
use crate::domain::rules::{MatchStrategy, PositionalMatch};
use crate::ports::{ExportPort, ExtractPort, FsPort, ProbePort};

pub trait AppContainer: Send + Sync {
    fn reconcile_interactor(&self) -> Arc<ReconcileInteractor>;
    fn validate_interactor(&self) -> Arc<ValidateInteractor>;
}

pub struct DefaultAppContainer {
    reconcile_interactor: Arc<ReconcileInteractor>,
    validate_interactor: Arc<ValidateInteractor>,
}

impl DefaultAppContainer {
    pub fn new(config: &AppConfig) -> Result<Self, DomainError> {
        let parser = config.parser_options()?;
        let timeout = Duration::from_secs(config.media.extract_timeout_secs);

        let fs_port = Arc::new(FsLocalAdapter::new());
        let probe_port = Arc::new(FFprobeAdapter::new(
            config.media.ffprobe_path.clone(),
            timeout,
        ));
        let extract_port = Arc::new(FFmpegAdapter::new(
            config.media.ffmpeg_path.clone(),
            config.media.thumbnail_width,
            config.media.thumbnail_height,
        ));
        let export_port = Arc::new(ReportExportAdapter::new());
        let strategy: Arc<dyn MatchStrategy> = Arc::new(PositionalMatch);

        let settings = ReconcileSettings {
            parser: parser.clone(),
            thumbnail_dir: config.media.thumbnail_dir.clone(),
            clip_dir: config.media.clip_dir.clone(),
            max_parallel_extractions: config.media.max_parallel_extractions,
            extract_timeout: timeout,
        };

        let reconcile_interactor = Arc::new(ReconcileInteractor::new(
            Arc::clone(&fs_port) as Arc<dyn FsPort>,
            Arc::clone(&probe_port) as Arc<dyn ProbePort>,
            extract_port as Arc<dyn ExtractPort>,
            export_port as Arc<dyn ExportPort>,
            strategy,
            settings,
        ));

        let validate_interactor = Arc::new(ValidateInteractor::new(
            fs_port as Arc<dyn FsPort>,
            probe_port as Arc<dyn ProbePort>,
            parser,
        ));

        Ok(Self {
            reconcile_interactor,
            validate_interactor,
        })
    }
}

impl AppContainer for DefaultAppContainer {
    fn reconcile_interactor(&self) -> Arc<ReconcileInteractor> {
        Arc::clone(&self.reconcile_interactor)
    }

    fn validate_interactor(&self) -> Arc<ValidateInteractor> {
        Arc::clone(&self.validate_interactor)
    }
}
