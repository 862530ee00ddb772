//! Flat CSV export: one row per summary bullet.

use chrono::NaiveDate;

use super::rows::{detail_cells, detail_rows, DETAIL_HEADERS};
use crate::domain::swot::AnalysisReport;
use crate::ports::{ExportError, ExportFormat, ReportExporter};

/// Spreadsheet tools only detect UTF-8 with a byte order mark.
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

#[derive(Debug, Clone, Copy, Default)]
pub struct CsvExporter;

impl ReportExporter for CsvExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Csv
    }

    fn export(&self, report: &AnalysisReport, exported_on: NaiveDate) -> Result<Vec<u8>, ExportError> {
        let date = exported_on.format("%Y-%m-%d").to_string();
        let mut writer = csv::Writer::from_writer(UTF8_BOM.to_vec());

        writer.write_record(DETAIL_HEADERS).map_err(serialization)?;
        for row in detail_rows(&report.result) {
            let cells: Vec<String> = detail_cells(row, &date)
                .iter()
                .map(ToString::to_string)
                .collect();
            writer.write_record(&cells).map_err(serialization)?;
        }

        writer
            .into_inner()
            .map_err(|e| ExportError::Serialization(e.to_string()))
    }
}

fn serialization(err: csv::Error) -> ExportError {
    ExportError::Serialization(err.to_string())
}
