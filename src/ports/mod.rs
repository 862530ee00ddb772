//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `CompletionProvider` - The text-completion model
//! - `DatasetSource` - Uploaded tabular data
//! - `ReportExporter` - Downloadable report formats

mod completion_provider;
mod dataset_source;
mod report_exporter;

pub use completion_provider::{
    CompletionError, CompletionProvider, CompletionRequest, CompletionResponse, FinishReason,
    ProviderInfo, TokenUsage,
};
pub use dataset_source::{DatasetError, DatasetFailure, DatasetSource, LoadReport};
pub use report_exporter::{ExportError, ExportFormat, ReportExporter};
