//! Report Exporter Port - Interface for downloadable report formats.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::swot::AnalysisReport;

/// Port for turning a finished report into a file.
///
/// Exports are deterministic: the same report and date produce the same
/// bytes. The date is passed in rather than read from the clock.
pub trait ReportExporter: Send + Sync {
    /// The format this exporter writes.
    fn format(&self) -> ExportFormat;

    /// Serializes the report.
    fn export(&self, report: &AnalysisReport, exported_on: NaiveDate)
        -> Result<Vec<u8>, ExportError>;
}

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Json,
    Csv,
    Xlsx,
}

impl ExportFormat {
    pub fn all() -> &'static [ExportFormat] {
        &[ExportFormat::Json, ExportFormat::Csv, ExportFormat::Xlsx]
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
            ExportFormat::Xlsx => "xlsx",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Json => "application/json",
            ExportFormat::Csv => "text/csv; charset=utf-8",
            ExportFormat::Xlsx => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
        }
    }

    /// Download name: `swot_<title>_<yyyymmdd>.<ext>`, with the title reduced
    /// to filename-safe characters.
    pub fn file_name(&self, report: &AnalysisReport, exported_on: NaiveDate) -> String {
        let title: String = report
            .title()
            .chars()
            .map(|c| if c.is_alphanumeric() { c } else { '_' })
            .collect();
        format!(
            "swot_{}_{}.{}",
            title,
            exported_on.format("%Y%m%d"),
            self.extension()
        )
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            "xlsx" | "excel" => Ok(ExportFormat::Xlsx),
            other => Err(ExportError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Export errors.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("unsupported export format: {0}")]
    UnsupportedFormat(String),

    #[error("serialization failed: {0}")]
    Serialization(String),

    #[error("spreadsheet generation failed: {0}")]
    Spreadsheet(String),

    #[error("failed to write export: {0}")]
    Io(#[from] std::io::Error),
}
