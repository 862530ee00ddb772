//! Dataset Source Port - Interface for reading uploaded tables.

use std::path::{Path, PathBuf};

use crate::domain::context::Dataset;

/// Port for loading tabular datasets.
///
/// Loading a directory never fails as a whole because of one bad file: that
/// file is recorded in the [`LoadReport`] and the rest are still returned.
pub trait DatasetSource: Send + Sync {
    /// Loads one file, or every supported file in a directory.
    fn load_path(&self, path: &Path) -> Result<LoadReport, DatasetError>;

    /// Parses one in-memory file, e.g. an upload.
    fn parse(&self, name: &str, content: &[u8]) -> Result<Dataset, DatasetError>;
}

/// Datasets that loaded plus the files that did not.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub datasets: Vec<Dataset>,
    pub failures: Vec<DatasetFailure>,
}

impl LoadReport {
    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty() && self.failures.is_empty()
    }
}

/// One file that could not be read.
#[derive(Debug)]
pub struct DatasetFailure {
    pub source: String,
    pub error: DatasetError,
}

/// Dataset source errors.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// Path does not exist.
    #[error("dataset not found: {0}")]
    NotFound(PathBuf),

    /// File could not be read.
    #[error("failed to read {path}: {message}")]
    Io { path: PathBuf, message: String },

    /// Content is not a readable table.
    #[error("malformed dataset {source_name}: {message}")]
    Malformed { source_name: String, message: String },

    /// File has no header row.
    #[error("dataset {0} is empty")]
    Empty(String),
}

impl DatasetError {
    pub fn malformed(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Malformed {
            source_name: source_name.into(),
            message: message.into(),
        }
    }
}
