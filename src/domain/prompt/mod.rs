//! Prompt module - turns an analysis request into the model prompt.
//!
//! - `AnalysisRequest` fixes the mode and its subjects
//! - `SchemaDescriptor` describes the structured block the reply must carry
//! - `PromptBuilder` assembles persona, subjects, context, contract and outline

mod builder;
mod request;
mod schema;
mod sections;

pub use builder::{
    PromptBuilder, PromptProfile, CLOSING_INSTRUCTION, DEFAULT_MARKET, IMPORTANT_PREFIX,
};
pub use request::AnalysisRequest;
pub use schema::{FieldShape, SchemaDescriptor, SchemaField, SCORE_PLACEHOLDER};
pub use sections::{category_marker, category_outline, STRATEGY_MARKER};
