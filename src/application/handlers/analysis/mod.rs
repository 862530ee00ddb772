//! Analysis command and query handlers.

mod prepare_prompt;
mod run_analysis;

pub use prepare_prompt::{PreparePromptHandler, PreparePromptQuery, PreparedPrompt};
pub use run_analysis::{
    CompletionSettings, RunAnalysisCommand, RunAnalysisError, RunAnalysisHandler,
    RunAnalysisResult,
};
