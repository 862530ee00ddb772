//! Response extractor: structured block to typed result, or the fallback.
//!
//! Extraction never fails. A reply without a usable block yields the fixed
//! fallback for the mode, and `extract_with_outcome` says why.

use serde::de::DeserializeOwned;
use thiserror::Error;

use super::first_json_block;
use crate::domain::swot::{
    fallback_for, AnalysisMode, AnalysisResult, BranchResult, MultiResult, PairwiseResult,
    SingleResult,
};

/// Why a reply was replaced by the fallback result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FallbackReason {
    #[error("no fenced json block in the reply")]
    MissingBlock,

    #[error("structured block is not valid JSON: {0}")]
    InvalidJson(String),

    #[error("structured block does not match the {mode} schema: {detail}")]
    SchemaMismatch { mode: AnalysisMode, detail: String },
}

/// Whether the result came from the reply or from the fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionOutcome {
    Parsed,
    Fallback(FallbackReason),
}

impl ExtractionOutcome {
    pub fn is_parsed(&self) -> bool {
        matches!(self, ExtractionOutcome::Parsed)
    }
}

/// A result together with how it was obtained.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    pub result: AnalysisResult,
    pub outcome: ExtractionOutcome,
}

/// Extracts typed results from raw model replies.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseExtractor;

impl ResponseExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Returns the typed result for `mode`, or the mode's fallback.
    pub fn extract(&self, mode: AnalysisMode, raw: &str) -> AnalysisResult {
        self.extract_with_outcome(mode, raw).result
    }

    /// Like [`extract`](Self::extract), also reporting parse versus fallback.
    pub fn extract_with_outcome(&self, mode: AnalysisMode, raw: &str) -> Extraction {
        match parse(mode, raw) {
            Ok(result) => {
                warn_out_of_range(mode, &result);
                Extraction {
                    result,
                    outcome: ExtractionOutcome::Parsed,
                }
            }
            Err(reason) => {
                tracing::warn!(mode = %mode, reason = %reason, "Substituting fallback result");
                Extraction {
                    result: fallback_for(mode).clone(),
                    outcome: ExtractionOutcome::Fallback(reason),
                }
            }
        }
    }
}

fn parse(mode: AnalysisMode, raw: &str) -> Result<AnalysisResult, FallbackReason> {
    let block = first_json_block(raw).ok_or(FallbackReason::MissingBlock)?;
    let value: serde_json::Value = serde_json::from_str(block.body)
        .map_err(|e| FallbackReason::InvalidJson(e.to_string()))?;

    match mode {
        AnalysisMode::Single => coerce::<SingleResult>(mode, value).map(Into::into),
        AnalysisMode::Branch => coerce::<BranchResult>(mode, value).map(Into::into),
        AnalysisMode::Pairwise => coerce::<PairwiseResult>(mode, value).map(Into::into),
        AnalysisMode::AutoDetect => {
            let result = coerce::<PairwiseResult>(mode, value)?;
            if result.detected_shops.is_empty() {
                return Err(FallbackReason::SchemaMismatch {
                    mode,
                    detail: "missing field `detected_shops`".to_string(),
                });
            }
            Ok(result.into())
        }
        AnalysisMode::Multi => coerce::<MultiResult>(mode, value).map(Into::into),
    }
}

fn coerce<T: DeserializeOwned>(
    mode: AnalysisMode,
    value: serde_json::Value,
) -> Result<T, FallbackReason> {
    serde_json::from_value(value).map_err(|e| FallbackReason::SchemaMismatch {
        mode,
        detail: e.to_string(),
    })
}

fn warn_out_of_range(mode: AnalysisMode, result: &AnalysisResult) {
    for subject in result.scored_subjects() {
        if let Err(e) = subject.scores.validate() {
            tracing::warn!(
                mode = %mode,
                subject = %subject.name,
                error = %e,
                "Score outside the requested range"
            );
        }
    }
}
