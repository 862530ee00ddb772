//! Command and query handlers.

pub mod analysis;

pub use analysis::{
    CompletionSettings, PreparePromptHandler, PreparePromptQuery, PreparedPrompt,
    RunAnalysisCommand, RunAnalysisError, RunAnalysisHandler, RunAnalysisResult,
};
