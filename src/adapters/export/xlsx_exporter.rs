//! Multi-sheet XLSX export.

use chrono::NaiveDate;
use rust_xlsxwriter::{Format, Workbook, XlsxError};

use super::rows::{sheets, Cell};
use crate::domain::swot::AnalysisReport;
use crate::ports::{ExportError, ExportFormat, ReportExporter};

const COLUMN_WIDTH: f64 = 18.0;

#[derive(Debug, Clone, Copy, Default)]
pub struct XlsxExporter;

impl XlsxExporter {
    fn build(report: &AnalysisReport, exported_on: NaiveDate) -> Result<Vec<u8>, XlsxError> {
        let date = exported_on.format("%Y-%m-%d").to_string();
        let header = Format::new().set_bold();
        let mut workbook = Workbook::new();

        for sheet in sheets(report, &date) {
            let worksheet = workbook.add_worksheet();
            worksheet.set_name(sheet.name)?;

            for (col, title) in sheet.headers.iter().enumerate() {
                let col = col as u16;
                worksheet.write_string_with_format(0, col, *title, &header)?;
                worksheet.set_column_width(col, COLUMN_WIDTH)?;
            }
            worksheet.set_freeze_panes(1, 0)?;

            for (i, row) in sheet.rows.iter().enumerate() {
                let r = (i + 1) as u32;
                for (col, cell) in row.iter().enumerate() {
                    let col = col as u16;
                    match cell {
                        Cell::Text(s) => worksheet.write_string(r, col, s.as_str())?,
                        Cell::Number(v) => worksheet.write_number(r, col, *v)?,
                    };
                }
            }
        }

        workbook.save_to_buffer()
    }
}

impl ReportExporter for XlsxExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Xlsx
    }

    fn export(&self, report: &AnalysisReport, exported_on: NaiveDate) -> Result<Vec<u8>, ExportError> {
        Self::build(report, exported_on).map_err(|e| ExportError::Spreadsheet(e.to_string()))
    }
}
