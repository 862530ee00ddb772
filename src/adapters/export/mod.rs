//! Report exporters: JSON, flat CSV and multi-sheet XLSX.
//!
//! All three re-serialize the same [`AnalysisReport`](crate::domain::swot::AnalysisReport);
//! the tabular two share the flattening in [`rows`].

mod csv_exporter;
mod json_exporter;
pub mod rows;
mod xlsx_exporter;

pub use csv_exporter::CsvExporter;
pub use json_exporter::JsonExporter;
pub use xlsx_exporter::XlsxExporter;

use crate::ports::{ExportFormat, ReportExporter};

/// The exporter for a format.
pub fn exporter_for(format: ExportFormat) -> Box<dyn ReportExporter> {
    match format {
        ExportFormat::Json => Box::new(JsonExporter),
        ExportFormat::Csv => Box::new(CsvExporter),
        ExportFormat::Xlsx => Box::new(XlsxExporter),
    }
}
