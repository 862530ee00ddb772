//! HTTP DTOs (Data Transfer Objects) for analysis endpoints.
//!
//! These types define the JSON request/response structure for the analysis API.
//! They serve as the boundary between HTTP and the application layer.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::application::RunAnalysisResult;
use crate::domain::extraction::ExtractionOutcome;
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::prompt::AnalysisRequest;
use crate::domain::swot::{AnalysisMode, AnalysisResult};
use crate::ports::{ProviderInfo, TokenUsage};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to run an analysis.
///
/// The mode tag and its subjects sit at the top level:
/// `{"mode": "pairwise", "my_shop": {"name": "A"}, "competitor": {"name": "B"}}`.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(flatten)]
    pub request: AnalysisRequest,
    /// Free-text context.
    #[serde(default)]
    pub context: Option<String>,
    /// CSV files sent inline.
    #[serde(default)]
    pub datasets: Vec<InlineDataset>,
}

/// One uploaded CSV file.
#[derive(Debug, Clone, Deserialize)]
pub struct InlineDataset {
    /// File name, used as the dataset label.
    pub name: String,
    /// Raw CSV text.
    pub content: String,
}

/// Query parameters for export.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExportQuery {
    /// Export date; today when absent.
    pub date: Option<NaiveDate>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Response for a finished analysis.
///
/// The body is also a valid export request: `mode`, `result` and
/// `narrative` are what `POST /api/export/{format}` reads.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResponse {
    pub trace_id: String,
    pub mode: AnalysisMode,
    pub result: AnalysisResult,
    pub narrative: String,
    pub extraction: ExtractionResponse,
    pub provider: ProviderInfo,
    pub usage: TokenUsage,
    /// Inline datasets that could not be read and were left out.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dataset_errors: Vec<DatasetErrorResponse>,
}

impl AnalysisResponse {
    pub fn new(result: RunAnalysisResult, dataset_errors: Vec<DatasetErrorResponse>) -> Self {
        Self {
            trace_id: result.trace_id,
            mode: result.report.mode,
            result: result.report.result,
            narrative: result.report.narrative,
            extraction: ExtractionResponse::from(&result.outcome),
            provider: result.provider,
            usage: result.usage,
            dataset_errors,
        }
    }
}

/// Whether the structured result was parsed or substituted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResponse {
    /// `"parsed"` or `"fallback"`.
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl From<&ExtractionOutcome> for ExtractionResponse {
    fn from(outcome: &ExtractionOutcome) -> Self {
        match outcome {
            ExtractionOutcome::Parsed => Self {
                status: "parsed".to_string(),
                reason: None,
            },
            ExtractionOutcome::Fallback(reason) => Self {
                status: "fallback".to_string(),
                reason: Some(reason.to_string()),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DatasetErrorResponse {
    pub name: String,
    pub message: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub provider: ProviderInfo,
}

/// Error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Additional error details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::InternalError.to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }
}

impl From<&DomainError> for ErrorResponse {
    fn from(err: &DomainError) -> Self {
        let details = if err.details.is_empty() {
            None
        } else {
            serde_json::to_value(&err.details).ok()
        };
        Self {
            code: err.code.to_string(),
            message: err.message.clone(),
            details,
        }
    }
}
