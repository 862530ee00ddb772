//! JSON report export.

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::swot::AnalysisReport;
use crate::ports::{ExportError, ExportFormat, ReportExporter};

/// Pretty-printed report with the export date alongside.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonExporter;

#[derive(Serialize)]
struct JsonDocument<'a> {
    exported_on: NaiveDate,
    #[serde(flatten)]
    report: &'a AnalysisReport,
}

impl ReportExporter for JsonExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Json
    }

    fn export(&self, report: &AnalysisReport, exported_on: NaiveDate) -> Result<Vec<u8>, ExportError> {
        serde_json::to_vec_pretty(&JsonDocument {
            exported_on,
            report,
        })
        .map_err(|e| ExportError::Serialization(e.to_string()))
    }
}
