//! RunAnalysis command handler.
//!
//! One request, one pipeline: prepare the prompt, call the completion
//! provider once, extract the structured result and clean the narrative.
//! Extraction problems never fail the command; they come back as a
//! fallback outcome. Provider failures abort it.

use std::sync::Arc;
use thiserror::Error;

use super::prepare_prompt::{PreparePromptHandler, PreparePromptQuery};
use crate::domain::extraction::{ExtractionOutcome, ResponseExtractor};
use crate::domain::foundation::DomainError;
use crate::domain::narrative::NarrativeCleaner;
use crate::domain::swot::AnalysisReport;
use crate::ports::{
    CompletionError, CompletionProvider, CompletionRequest, FinishReason, ProviderInfo, TokenUsage,
};

/// Command to run one analysis.
pub type RunAnalysisCommand = PreparePromptQuery;

/// Sampling settings passed to the provider on every call.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CompletionSettings {
    pub temperature: Option<f32>,
    pub max_output_tokens: Option<u32>,
}

/// Errors that can occur when running an analysis.
#[derive(Debug, Clone, Error)]
pub enum RunAnalysisError {
    /// The request itself is invalid.
    #[error("Invalid request: {0}")]
    Validation(DomainError),

    /// The completion provider failed.
    #[error("Completion failed: {0}")]
    Completion(#[from] CompletionError),
}

impl From<DomainError> for RunAnalysisError {
    fn from(err: DomainError) -> Self {
        RunAnalysisError::Validation(err)
    }
}

/// Result of a finished analysis.
#[derive(Debug, Clone)]
pub struct RunAnalysisResult {
    pub report: AnalysisReport,
    pub outcome: ExtractionOutcome,
    pub trace_id: String,
    pub provider: ProviderInfo,
    pub finish_reason: FinishReason,
    pub usage: TokenUsage,
}

/// Handler for RunAnalysis commands.
pub struct RunAnalysisHandler {
    provider: Arc<dyn CompletionProvider>,
    prompts: PreparePromptHandler,
    extractor: ResponseExtractor,
    cleaner: NarrativeCleaner,
    settings: CompletionSettings,
}

impl RunAnalysisHandler {
    pub fn new(provider: Arc<dyn CompletionProvider>, prompts: PreparePromptHandler) -> Self {
        Self {
            provider,
            prompts,
            extractor: ResponseExtractor::new(),
            cleaner: NarrativeCleaner::new(),
            settings: CompletionSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: CompletionSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn provider_info(&self) -> ProviderInfo {
        self.provider.provider_info()
    }

    pub async fn handle(&self, cmd: RunAnalysisCommand) -> Result<RunAnalysisResult, RunAnalysisError> {
        let trace_id = uuid::Uuid::new_v4().to_string();
        let prepared = self.prompts.handle(&cmd)?;
        let mode = prepared.mode;

        tracing::info!(trace_id = %trace_id, mode = %mode, "Running analysis");
        tracing::debug!(
            trace_id = %trace_id,
            prompt_chars = prepared.prompt.len(),
            context_chars = prepared.context.len(),
            datasets = cmd.datasets.len(),
            "Prompt prepared"
        );

        let mut request = CompletionRequest::new(prepared.prompt).with_trace_id(trace_id.clone());
        if let Some(t) = self.settings.temperature {
            request = request.with_temperature(t);
        }
        if let Some(max) = self.settings.max_output_tokens {
            request = request.with_max_tokens(max);
        }

        let response = self.provider.complete(request).await.map_err(|e| {
            tracing::error!(trace_id = %trace_id, error = %e, "Completion failed");
            e
        })?;

        tracing::debug!(
            trace_id = %trace_id,
            reply_chars = response.content.len(),
            finish_reason = ?response.finish_reason,
            total_tokens = response.usage.total_tokens,
            "Completion received"
        );
        if response.finish_reason == FinishReason::Length {
            tracing::warn!(trace_id = %trace_id, "Reply hit the token limit; structured block may be cut off");
        }

        let extraction = self.extractor.extract_with_outcome(mode, &response.content);
        let narrative = self.cleaner.clean(&response.content);

        let mut report = AnalysisReport::new(mode, extraction.result, narrative);
        if let ExtractionOutcome::Fallback(reason) = &extraction.outcome {
            report = report.with_fallback_reason(reason.to_string());
        }

        tracing::info!(
            trace_id = %trace_id,
            mode = %mode,
            parsed = extraction.outcome.is_parsed(),
            "Analysis complete"
        );

        Ok(RunAnalysisResult {
            report,
            outcome: extraction.outcome,
            trace_id,
            provider: self.provider.provider_info(),
            finish_reason: response.finish_reason,
            usage: response.usage,
        })
    }
}
