//! HTTP handlers for analysis endpoints.
//!
//! These handlers connect Axum routes to the application layer handlers and
//! the export adapters.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;

use crate::adapters::export::exporter_for;
use crate::application::{RunAnalysisCommand, RunAnalysisError, RunAnalysisHandler};
use crate::domain::foundation::ErrorCode;
use crate::domain::swot::AnalysisReport;
use crate::ports::{CompletionError, DatasetSource, ExportFormat};

use super::dto::{
    AnalysisResponse, AnalyzeRequest, DatasetErrorResponse, ErrorResponse, ExportQuery,
    HealthResponse,
};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing all dependencies.
#[derive(Clone)]
pub struct AnalysisAppState {
    pub analysis_handler: Arc<RunAnalysisHandler>,
    pub dataset_source: Arc<dyn DatasetSource>,
}

impl AnalysisAppState {
    pub fn new(
        analysis_handler: Arc<RunAnalysisHandler>,
        dataset_source: Arc<dyn DatasetSource>,
    ) -> Self {
        Self {
            analysis_handler,
            dataset_source,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// GET /health
pub async fn health(State(state): State<AnalysisAppState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        provider: state.analysis_handler.provider_info(),
    })
}

/// POST /api/analysis - Run one analysis
pub async fn run_analysis(
    State(state): State<AnalysisAppState>,
    body: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AnalysisApiError> {
    let Json(request) = body.map_err(|e| AnalysisApiError::BadRequest(e.body_text()))?;

    let mut datasets = Vec::with_capacity(request.datasets.len());
    let mut dataset_errors = Vec::new();
    for inline in &request.datasets {
        match state
            .dataset_source
            .parse(&inline.name, inline.content.as_bytes())
        {
            Ok(dataset) => datasets.push(dataset),
            Err(e) => {
                tracing::warn!(dataset = %inline.name, error = %e, "Skipping unreadable dataset");
                dataset_errors.push(DatasetErrorResponse {
                    name: inline.name.clone(),
                    message: e.to_string(),
                });
            }
        }
    }

    let mut cmd = RunAnalysisCommand::new(request.request).with_datasets(datasets);
    if let Some(context) = request.context {
        cmd = cmd.with_context(context);
    }

    let result = state.analysis_handler.handle(cmd).await?;
    Ok((StatusCode::OK, Json(AnalysisResponse::new(result, dataset_errors))))
}

/// POST /api/export/:format - Convert a report into a downloadable file
pub async fn export_report(
    Path(format): Path<String>,
    Query(query): Query<ExportQuery>,
    body: Result<Json<AnalysisReport>, JsonRejection>,
) -> Result<impl IntoResponse, AnalysisApiError> {
    let format: ExportFormat = format
        .parse()
        .map_err(|e: crate::ports::ExportError| AnalysisApiError::BadRequest(e.to_string()))?;
    let Json(report) = body.map_err(|e| AnalysisApiError::BadRequest(e.body_text()))?;

    if !report.result.matches_mode(report.mode) {
        return Err(AnalysisApiError::BadRequest(format!(
            "result does not have the shape of a {} analysis",
            report.mode
        )));
    }

    let date = query
        .date
        .unwrap_or_else(|| chrono::Local::now().date_naive());
    let bytes = exporter_for(format)
        .export(&report, date)
        .map_err(|e| {
            tracing::error!(%format, error = %e, "Export failed");
            AnalysisApiError::Internal(
                ErrorResponse::internal(e.to_string()).with_code(ErrorCode::ExportFailed.as_str()),
            )
        })?;

    let disposition = format!("attachment; filename=\"{}\"", format.file_name(&report, date));
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, format.content_type().to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    ))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts application errors to HTTP responses.
#[derive(Debug)]
pub enum AnalysisApiError {
    BadRequest(String),
    Invalid(ErrorResponse),
    Upstream(ErrorResponse),
    Internal(ErrorResponse),
}

impl From<RunAnalysisError> for AnalysisApiError {
    fn from(err: RunAnalysisError) -> Self {
        match err {
            RunAnalysisError::Validation(e) if e.code.is_client_error() => {
                AnalysisApiError::Invalid(ErrorResponse::from(&e))
            }
            RunAnalysisError::Validation(e) => AnalysisApiError::Internal(ErrorResponse::from(&e)),
            RunAnalysisError::Completion(e) => {
                let code = match e {
                    CompletionError::RateLimited { .. } => ErrorCode::RateLimited,
                    _ => ErrorCode::CompletionFailed,
                };
                AnalysisApiError::Upstream(ErrorResponse {
                    code: code.to_string(),
                    message: e.to_string(),
                    details: None,
                })
            }
        }
    }
}

impl IntoResponse for AnalysisApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            AnalysisApiError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ErrorResponse::bad_request(msg))
            }
            AnalysisApiError::Invalid(body) => (StatusCode::BAD_REQUEST, body),
            AnalysisApiError::Upstream(body) => (StatusCode::BAD_GATEWAY, body),
            AnalysisApiError::Internal(body) => (StatusCode::INTERNAL_SERVER_ERROR, body),
        };

        (status, Json(error)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::DomainError;

    #[test]
    fn validation_maps_to_bad_request() {
        let err = AnalysisApiError::from(RunAnalysisError::Validation(DomainError::validation(
            "context", "missing",
        )));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn completion_failure_maps_to_bad_gateway() {
        let err = AnalysisApiError::from(RunAnalysisError::Completion(
            CompletionError::AuthenticationFailed,
        ));
        assert_eq!(err.into_response().status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn rate_limit_keeps_its_code() {
        match AnalysisApiError::from(RunAnalysisError::Completion(CompletionError::rate_limited(5)))
        {
            AnalysisApiError::Upstream(body) => assert_eq!(body.code, "RATE_LIMITED"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn export_failure_maps_to_internal_error() {
        let response =
            AnalysisApiError::Internal(ErrorResponse::internal("disk full")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
