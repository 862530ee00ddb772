//! Analysis pipeline configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Analysis pipeline configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisConfig {
    /// Market named in the analyst persona
    #[serde(default = "default_market")]
    pub market: String,

    /// Leading rows of each dataset shown to the model
    #[serde(default = "default_sample_rows")]
    pub sample_rows: usize,

    /// Directory scanned for CSV files when no path is given
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl AnalysisConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.market.trim().is_empty() {
            return Err(ValidationError::MissingRequired("ANALYSIS__MARKET"));
        }
        if self.sample_rows == 0 || self.sample_rows > 100 {
            return Err(ValidationError::InvalidSampleRows(self.sample_rows));
        }
        Ok(())
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            market: default_market(),
            sample_rows: default_sample_rows(),
            data_dir: default_data_dir(),
        }
    }
}

fn default_market() -> String {
    crate::domain::prompt::DEFAULT_MARKET.to_string()
}

fn default_sample_rows() -> usize {
    crate::domain::context::DEFAULT_SAMPLE_ROWS
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}
