// TOML config adapter - Typed configuration loaded from TOML files

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::model::ParserOptions;
use crate::error::{ReconError, ReconResult};
use crate::utils::logging::LoggingConfig;

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub parser: ParserConfig,
    pub media: MediaConfig,
    pub logging: LoggingConfig,
}

/// Sentinels used when reading exports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    pub error_marker: String,
    pub null_sentinel: String,
    pub path_separator: String,
}

impl Default for ParserConfig {
    fn default() -> Self {
        let options = ParserOptions::default();
        Self {
            error_marker: options.error_marker,
            null_sentinel: options.null_sentinel,
            path_separator: options.path_separator.to_string(),
        }
    }
}

/// External tools and media output settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaConfig {
    pub ffprobe_path: PathBuf,
    pub ffmpeg_path: PathBuf,
    pub thumbnail_dir: PathBuf,
    pub clip_dir: PathBuf,
    pub thumbnail_width: u32,
    pub thumbnail_height: u32,
    pub max_parallel_extractions: usize,
    pub extract_timeout_secs: u64,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            ffprobe_path: PathBuf::from("ffprobe"),
            ffmpeg_path: PathBuf::from("ffmpeg"),
            thumbnail_dir: PathBuf::from("thumbnails"),
            clip_dir: PathBuf::from("shots"),
            thumbnail_width: 96,
            thumbnail_height: 74,
            max_parallel_extractions: num_cpus::get(),
            extract_timeout_secs: 30,
        }
    }
}

impl AppConfig {
    /// Parser options; fails when the separator is not a single character
    pub fn parser_options(&self) -> ReconResult<ParserOptions> {
        let mut chars = self.parser.path_separator.chars();
        let separator = match (chars.next(), chars.next()) {
            (Some(c), None) => c,
            _ => {
                return Err(ReconError::ConfigError {
                    message: format!(
                        "path_separator must be a single character, got '{}'",
                        self.parser.path_separator
                    ),
                })
            }
        };

        Ok(ParserOptions {
            error_marker: self.parser.error_marker.clone(),
            null_sentinel: self.parser.null_sentinel.clone(),
            path_separator: separator,
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> ReconResult<()> {
        if self.parser.error_marker.is_empty() {
            return Err(ReconError::ConfigError {
                message: "error_marker cannot be empty".to_string(),
            });
        }
        self.parser_options()?;

        if self.media.thumbnail_width == 0 || self.media.thumbnail_height == 0 {
            return Err(ReconError::ConfigError {
                message: "Thumbnail dimensions cannot be zero".to_string(),
            });
        }
        if self.media.max_parallel_extractions == 0 {
            return Err(ReconError::ConfigError {
                message: "max_parallel_extractions must be at least 1".to_string(),
            });
        }
        if self.media.extract_timeout_secs == 0 {
            return Err(ReconError::ConfigError {
                message: "extract_timeout_secs must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// TOML configuration adapter
pub struct TomlConfigAdapter;

impl TomlConfigAdapter {
    /// Candidate config files, in search order
    pub fn default_config_paths() -> Vec<PathBuf> {
        vec![
            PathBuf::from("framerecon.toml"),
            PathBuf::from("config").join("framerecon.toml"),
        ]
    }

    /// Deserialize config from TOML string
    pub fn parse(toml_content: &str) -> ReconResult<AppConfig> {
        let config: AppConfig = toml::from_str(toml_content)?;
        Ok(config)
    }

    /// Load configuration from file
    pub fn load(path: &Path) -> ReconResult<AppConfig> {
        if !path.exists() {
            return Err(ReconError::InputFileNotFound {
                path: path.display().to_string(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        let config = Self::parse(&content)?;
        tracing::info!(path = %path.display(), "Loaded configuration file");
        Ok(config)
    }
}
