//! HTTP adapter for the analysis pipeline.
//!
//! # Endpoints
//!
//! - `GET /health` - Liveness check
//! - `POST /api/analysis` - Run an analysis in any mode
//! - `POST /api/export/{format}` - Turn a report into a JSON, CSV or XLSX file

pub mod dto;
pub mod handlers;
pub mod routes;

// Re-export commonly used types
pub use handlers::AnalysisAppState;
pub use routes::analysis_router;
