//! Route configuration for analysis endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{export_report, health, run_analysis, AnalysisAppState};

/// Creates the analysis router with all endpoints.
///
/// Routes:
/// - `GET /health` - Liveness and configured provider
/// - `POST /api/analysis` - Run one analysis
/// - `POST /api/export/:format` - Export a report as json, csv or xlsx
pub fn analysis_router() -> Router<AnalysisAppState> {
    Router::new()
        .route("/health", get(health))
        .route("/api/analysis", post(run_analysis))
        .route("/api/export/:format", post(export_report))
}
