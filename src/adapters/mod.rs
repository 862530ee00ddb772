//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - Completion providers (Gemini, OpenAI, mock)
//! - `dataset` - CSV dataset source
//! - `export` - JSON, CSV and XLSX report exporters
//! - `http` - Axum REST API

pub mod ai;
pub mod dataset;
pub mod export;
pub mod http;

pub use ai::{provider_from_config, MockCompletionProvider};
pub use dataset::CsvDatasetSource;
pub use export::{exporter_for, CsvExporter, JsonExporter, XlsxExporter};
pub use http::{app_router, AnalysisAppState};
