//! CSV dataset source.

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::context::Dataset;
use crate::ports::{DatasetError, DatasetFailure, DatasetSource, LoadReport};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Reads comma-separated files with a header row.
///
/// Rows may be ragged; cells are trimmed and typed by
/// [`CellValue::parse`](crate::domain::context::CellValue::parse).
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvDatasetSource;

impl CsvDatasetSource {
    pub fn new() -> Self {
        Self
    }

    fn is_csv(path: &Path) -> bool {
        path.is_file()
            && path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("csv"))
    }

    fn read_file(&self, path: &Path) -> Result<Dataset, DatasetError> {
        let content = fs::read(path).map_err(|e| DatasetError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        self.parse(&name, &content)
    }

    fn csv_files_in(dir: &Path) -> Result<Vec<PathBuf>, DatasetError> {
        let entries = fs::read_dir(dir).map_err(|e| DatasetError::Io {
            path: dir.to_path_buf(),
            message: e.to_string(),
        })?;

        let mut files: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| Self::is_csv(p))
            .collect();
        files.sort();
        Ok(files)
    }
}

impl DatasetSource for CsvDatasetSource {
    fn load_path(&self, path: &Path) -> Result<LoadReport, DatasetError> {
        if !path.exists() {
            return Err(DatasetError::NotFound(path.to_path_buf()));
        }

        if path.is_file() {
            return Ok(LoadReport {
                datasets: vec![self.read_file(path)?],
                failures: Vec::new(),
            });
        }

        let mut report = LoadReport::default();
        for file in Self::csv_files_in(path)? {
            match self.read_file(&file) {
                Ok(dataset) => {
                    tracing::debug!(
                        file = %file.display(),
                        rows = dataset.row_count(),
                        "Loaded dataset"
                    );
                    report.datasets.push(dataset);
                }
                Err(error) => {
                    tracing::warn!(file = %file.display(), error = %error, "Skipping unreadable dataset");
                    report.failures.push(DatasetFailure {
                        source: file.display().to_string(),
                        error,
                    });
                }
            }
        }
        Ok(report)
    }

    fn parse(&self, name: &str, content: &[u8]) -> Result<Dataset, DatasetError> {
        let content = content.strip_prefix(UTF8_BOM).unwrap_or(content);

        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(content);

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| DatasetError::malformed(name, e.to_string()))?
            .iter()
            .map(str::to_owned)
            .collect();

        if headers.iter().all(|h| h.is_empty()) {
            return Err(DatasetError::Empty(name.to_string()));
        }

        let rows = reader
            .records()
            .map(|record| {
                record
                    .map(|r| r.iter().map(str::to_owned).collect::<Vec<_>>())
                    .map_err(|e| DatasetError::malformed(name, e.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Dataset::from_rows(name, headers, rows)
            .map_err(|e| DatasetError::malformed(name, e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::context::CellValue;
    use std::io::Write;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    mod parse {
        use super::*;

        #[test]
        fn types_cells() {
            let dataset = CsvDatasetSource::new()
                .parse("menu.csv", b"product,price\nLatte, 45000\nTea,\n")
                .unwrap();

            assert_eq!(dataset.source(), "menu.csv");
            assert_eq!(dataset.column_names(), vec!["product", "price"]);
            assert_eq!(dataset.row_count(), 2);
            assert_eq!(dataset.columns()[1].values[0], CellValue::Integer(45000));
            assert_eq!(dataset.columns()[1].values[1], CellValue::Empty);
        }

        #[test]
        fn strips_byte_order_mark() {
            let dataset = CsvDatasetSource::new()
                .parse("bom.csv", b"\xEF\xBB\xBFshop,rating\nA,4.5\n")
                .unwrap();
            assert_eq!(dataset.column_names(), vec!["shop", "rating"]);
        }

        #[test]
        fn pads_ragged_rows() {
            let dataset = CsvDatasetSource::new()
                .parse("ragged.csv", b"a,b,c\n1\n1,2,3,4\n")
                .unwrap();
            assert_eq!(dataset.row_count(), 2);
            assert_eq!(dataset.columns()[2].values[0], CellValue::Empty);
            assert_eq!(dataset.columns().len(), 3);
        }

        #[test]
        fn rejects_empty_content() {
            let err = CsvDatasetSource::new().parse("empty.csv", b"").unwrap_err();
            assert!(matches!(err, DatasetError::Empty(_)));
        }

        #[test]
        fn rejects_invalid_utf8() {
            let err = CsvDatasetSource::new()
                .parse("bad.csv", b"name\n\xff\xfe\n")
                .unwrap_err();
            assert!(matches!(err, DatasetError::Malformed { .. }));
        }
    }

    mod load_path {
        use super::*;

        #[test]
        fn loads_single_file() {
            let dir = TempDir::new().unwrap();
            let path = write(&dir, "sales.csv", "day,revenue\nMon,100\n");

            let report = CsvDatasetSource::new().load_path(&path).unwrap();
            assert_eq!(report.datasets.len(), 1);
            assert_eq!(report.datasets[0].source(), "sales.csv");
            assert!(report.failures.is_empty());
        }

        #[test]
        fn loads_directory_in_name_order_and_skips_other_files() {
            let dir = TempDir::new().unwrap();
            write(&dir, "b.csv", "x\n1\n");
            write(&dir, "a.CSV", "y\n2\n");
            write(&dir, "notes.txt", "ignored");

            let report = CsvDatasetSource::new().load_path(dir.path()).unwrap();
            let names: Vec<_> = report.datasets.iter().map(|d| d.source()).collect();
            assert_eq!(names, vec!["a.CSV", "b.csv"]);
        }

        #[test]
        fn records_bad_files_and_keeps_the_rest() {
            let dir = TempDir::new().unwrap();
            write(&dir, "good.csv", "x\n1\n");
            write(&dir, "empty.csv", "");

            let report = CsvDatasetSource::new().load_path(dir.path()).unwrap();
            assert_eq!(report.datasets.len(), 1);
            assert_eq!(report.failures.len(), 1);
            assert!(report.failures[0].source.ends_with("empty.csv"));
        }

        #[test]
        fn empty_directory_gives_empty_report() {
            let dir = TempDir::new().unwrap();
            let report = CsvDatasetSource::new().load_path(dir.path()).unwrap();
            assert!(report.is_empty());
        }

        #[test]
        fn missing_path_is_not_found() {
            let err = CsvDatasetSource::new()
                .load_path(Path::new("/definitely/not/here"))
                .unwrap_err();
            assert!(matches!(err, DatasetError::NotFound(_)));
        }
    }
}
