// Report export adapter - Matched and unused reports written atomically

use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::domain::errors::*;
use crate::domain::model::UnusedEntry;
use crate::error::{ReconError, ReconResult};
use crate::ports::*;

const MATCHED_HEADER: [&str; 9] = [
    "Producer",
    "Operator",
    "Order Info",
    "Filename",
    "Frame Range",
    "Timestamp",
    "Timecode",
    "Thumbnail",
    "Clip",
];

const UNUSED_HEADER: [&str; 2] = ["Filename", "Unused Frame Range"];

/// Serialization format of the matched report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Csv,
    Json,
    Yaml,
}

impl ReportFormat {
    /// Pick the format from the file extension; anything unknown is CSV
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .as_deref()
        {
            Some("json") => ReportFormat::Json,
            Some("yaml") | Some("yml") => ReportFormat::Yaml,
            _ => ReportFormat::Csv,
        }
    }
}

#[derive(Serialize)]
struct MatchedReport<'a> {
    generated_at: DateTime<Utc>,
    rows: &'a [MatchedRow],
}

/// Quote a CSV field when it holds a delimiter, quote or line break.
///
/// Leading or trailing spaces do not trigger quoting; readers that trim
/// unquoted fields will drop them.
fn csv_field(value: &str) -> String {
    if value.contains(|c: char| matches!(c, ',' | '"' | '\n' | '\r')) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn csv_line<I, S>(fields: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut line = fields
        .into_iter()
        .map(|field| csv_field(field.as_ref()))
        .collect::<Vec<_>>()
        .join(",");
    line.push('\n');
    line
}

fn path_cell(path: &Option<PathBuf>, missing: &str) -> String {
    path.as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| missing.to_string())
}

/// Render matched rows as CSV text
pub fn matched_csv(rows: &[MatchedRow]) -> String {
    let mut out = csv_line(MATCHED_HEADER);
    for row in rows {
        out.push_str(&csv_line([
            row.producer.clone(),
            row.operator.clone(),
            row.order_info.clone(),
            row.filename.clone(),
            row.frames.clone(),
            row.timestamp.clone().unwrap_or_else(|| "Error".to_string()),
            row.timecode.clone().unwrap_or_default(),
            path_cell(&row.thumbnail, "No Thumbnail"),
            path_cell(&row.clip, ""),
        ]));
    }
    out
}

/// Render unused entries as CSV text
pub fn unused_csv(entries: &[UnusedEntry]) -> String {
    let mut out = csv_line(UNUSED_HEADER);
    for entry in entries {
        out.push_str(&csv_line([entry.filename.as_str(), entry.frames.as_str()]));
    }
    out
}

/// Write through a temporary file in the destination directory, then rename
fn write_atomic(path: &Path, content: &str) -> ReconResult<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&parent)?;

    let mut temp = tempfile::NamedTempFile::new_in(&parent)?;
    temp.write_all(content.as_bytes())?;
    temp.flush()?;
    temp.persist(path).map_err(|e| ReconError::ExportError {
        message: format!("Failed to move report into {}: {}", path.display(), e.error),
    })?;
    Ok(())
}

async fn write_report(path: &Path, content: String) -> Result<(), DomainError> {
    let target = path.to_path_buf();
    tokio::task::spawn_blocking(move || write_atomic(&target, &content))
        .await
        .map_err(|e| DomainError::InternalError(format!("Report writer task failed: {}", e)))?
        .map_err(DomainError::from)
}

/// Report exporter for CSV, JSON and YAML files
#[derive(Debug, Clone, Default)]
pub struct ReportExportAdapter;

impl ReportExportAdapter {
    pub fn new() -> Self {
        Self
    }

    fn render_matched(rows: &[MatchedRow], format: ReportFormat) -> ReconResult<String> {
        let report = MatchedReport {
            generated_at: Utc::now(),
            rows,
        };
        match format {
            ReportFormat::Csv => Ok(matched_csv(rows)),
            ReportFormat::Json => Ok(serde_json::to_string_pretty(&report)?),
            ReportFormat::Yaml => Ok(serde_yaml::to_string(&report)?),
        }
    }
}

#[async_trait]
impl ExportPort for ReportExportAdapter {
    async fn write_matched(&self, rows: &[MatchedRow], path: &Path) -> Result<(), DomainError> {
        let format = ReportFormat::from_path(path);
        let content = Self::render_matched(rows, format)?;
        write_report(path, content).await?;
        info!(path = %path.display(), rows = rows.len(), ?format, "Matched report exported");
        Ok(())
    }

    async fn write_unused(&self, entries: &[UnusedEntry], path: &Path) -> Result<(), DomainError> {
        write_report(path, unused_csv(entries)).await?;
        info!(path = %path.display(), rows = entries.len(), "Unused frames exported");
        Ok(())
    }
}
