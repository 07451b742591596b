//! Configuration initialization and hierarchy management

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use crate::adapters::toml_config::{AppConfig, TomlConfigAdapter};

/// Values taken from the command line, highest precedence
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub log_level: Option<String>,
    pub log_format: Option<String>,
    pub jobs: Option<usize>,
    pub thumbnail_dir: Option<PathBuf>,
}

/// Environment variables and the config keys they override
pub const ENV_MAPPINGS: &[(&str, &str)] = &[
    ("FRAMERECON_LOG_LEVEL", "logging.level"),
    ("FRAMERECON_LOG_FORMAT", "logging.format"),
    ("FRAMERECON_FFMPEG", "media.ffmpeg_path"),
    ("FRAMERECON_FFPROBE", "media.ffprobe_path"),
    ("FRAMERECON_THUMBNAIL_DIR", "media.thumbnail_dir"),
    ("FRAMERECON_JOBS", "media.max_parallel_extractions"),
];

/// Build the configuration following precedence: CLI > Env > File > Defaults
pub fn initialize_configuration(
    config_path: Option<&Path>,
    overrides: &ConfigOverrides,
) -> Result<AppConfig> {
    initialize_with_env(config_path, overrides, |key| std::env::var(key).ok())
}

/// Same as [`initialize_configuration`] with an injectable environment
pub fn initialize_with_env<F>(
    config_path: Option<&Path>,
    overrides: &ConfigOverrides,
    env: F,
) -> Result<AppConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = load_config_file(config_path)?;
    apply_environment(&mut config, env)?;
    apply_cli_overrides(&mut config, overrides)?;

    config.validate().context("Configuration is invalid")?;
    Ok(config)
}

/// Load configuration from file, falling back to defaults when none is found
fn load_config_file(explicit: Option<&Path>) -> Result<AppConfig> {
    if let Some(path) = explicit {
        return TomlConfigAdapter::load(path)
            .with_context(|| format!("Failed to load config file {}", path.display()));
    }

    for path in TomlConfigAdapter::default_config_paths() {
        if path.exists() {
            return TomlConfigAdapter::load(&path)
                .with_context(|| format!("Failed to load config file {}", path.display()));
        }
    }

    Ok(AppConfig::default())
}

/// Apply environment variable overrides
fn apply_environment<F>(config: &mut AppConfig, env: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    let mut env_overrides = 0;
    for (env_var, config_key) in ENV_MAPPINGS {
        let value = match env(env_var) {
            Some(value) if !value.trim().is_empty() => value,
            _ => continue,
        };

        match *config_key {
            "logging.level" => config.logging.level = value.parse()?,
            "logging.format" => config.logging.format = value.parse()?,
            "media.ffmpeg_path" => config.media.ffmpeg_path = PathBuf::from(&value),
            "media.ffprobe_path" => config.media.ffprobe_path = PathBuf::from(&value),
            "media.thumbnail_dir" => config.media.thumbnail_dir = PathBuf::from(&value),
            "media.max_parallel_extractions" => {
                config.media.max_parallel_extractions = value
                    .trim()
                    .parse()
                    .with_context(|| format!("{} must be a positive integer", env_var))?
            }
            _ => continue,
        }
        info!("Found environment override: {} = {}", env_var, value);
        env_overrides += 1;
    }

    if env_overrides > 0 {
        info!("Applied {} environment variable overrides", env_overrides);
    }
    Ok(())
}

/// Apply CLI argument overrides to configuration
fn apply_cli_overrides(config: &mut AppConfig, overrides: &ConfigOverrides) -> Result<()> {
    if let Some(level) = &overrides.log_level {
        config.logging.level = level.parse()?;
    }
    if let Some(format) = &overrides.log_format {
        config.logging.format = format.parse()?;
    }
    if let Some(jobs) = overrides.jobs {
        config.media.max_parallel_extractions = jobs;
    }
    if let Some(dir) = &overrides.thumbnail_dir {
        config.media.thumbnail_dir = dir.clone();
    }
    Ok(())
}
