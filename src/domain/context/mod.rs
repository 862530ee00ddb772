//! Context module - uploaded datasets and their prompt digest.

mod dataset;
mod summarizer;

pub use dataset::{CellValue, Column, Dataset, NumericStats};
pub use summarizer::{ContextSummarizer, SummaryOptions, DEFAULT_SAMPLE_ROWS};
