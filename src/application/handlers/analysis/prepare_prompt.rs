//! PreparePrompt query handler.
//!
//! Validates a request, digests its datasets and builds the prompt without
//! calling the model. The `prompt` CLI command and the analysis pipeline
//! both go through here.

use crate::domain::context::{ContextSummarizer, Dataset, SummaryOptions};
use crate::domain::foundation::DomainError;
use crate::domain::prompt::{AnalysisRequest, PromptBuilder};
use crate::domain::swot::AnalysisMode;

/// Query to build the prompt for one analysis.
#[derive(Debug, Clone)]
pub struct PreparePromptQuery {
    pub request: AnalysisRequest,
    /// Free text supplied alongside or instead of datasets.
    pub context: Option<String>,
    pub datasets: Vec<Dataset>,
}

impl PreparePromptQuery {
    pub fn new(request: AnalysisRequest) -> Self {
        Self {
            request,
            context: None,
            datasets: Vec::new(),
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_datasets(mut self, datasets: Vec<Dataset>) -> Self {
        self.datasets = datasets;
        self
    }
}

/// The built prompt and the context text it embeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedPrompt {
    pub mode: AnalysisMode,
    pub prompt: String,
    /// Empty when the request carried no context.
    pub context: String,
}

/// Handler for PreparePrompt queries.
#[derive(Debug, Clone)]
pub struct PreparePromptHandler {
    builder: PromptBuilder,
    summary_options: SummaryOptions,
}

impl PreparePromptHandler {
    pub fn new(builder: PromptBuilder, summary_options: SummaryOptions) -> Self {
        Self {
            builder,
            summary_options,
        }
    }

    pub fn handle(&self, query: &PreparePromptQuery) -> Result<PreparedPrompt, DomainError> {
        query.request.validate()?;
        let mode = query.request.mode();

        let context = self.context_text(mode, query);
        if mode == AnalysisMode::AutoDetect && context.is_empty() {
            return Err(DomainError::validation(
                "context",
                "Auto-detect comparison needs context data to find the shops in",
            ));
        }

        let prompt = self
            .builder
            .build(&query.request, Some(context.as_str()).filter(|c| !c.is_empty()));

        Ok(PreparedPrompt {
            mode,
            prompt,
            context,
        })
    }

    /// User text first, then the dataset digest. Two-shop comparisons get
    /// every row, other modes a sample.
    fn context_text(&self, mode: AnalysisMode, query: &PreparePromptQuery) -> String {
        let options = match mode {
            AnalysisMode::Pairwise | AnalysisMode::AutoDetect => {
                self.summary_options.with_full_content()
            }
            _ => self.summary_options,
        };
        let digest = ContextSummarizer::new(options).summarize(&query.datasets);

        let parts: Vec<&str> = [query.context.as_deref().unwrap_or(""), digest.as_str()]
            .into_iter()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect();
        parts.join("\n\n")
    }
}

impl Default for PreparePromptHandler {
    fn default() -> Self {
        Self::new(PromptBuilder::default(), SummaryOptions::default())
    }
}
