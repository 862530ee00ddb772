//! Domain layer containing the prompt-response contract and its data model.
//!
//! # Module Organization
//!
//! - `foundation` - Shared error vocabulary
//! - `swot` - Scores, summaries, subjects, typed results and fallbacks
//! - `context` - Uploaded datasets and the context summarizer
//! - `prompt` - Requests, schema descriptor and the prompt builder
//! - `extraction` - Fenced-block scanner and response extractor
//! - `narrative` - Narrative cleaner for display text

pub mod context;
pub mod extraction;
pub mod foundation;
pub mod narrative;
pub mod prompt;
pub mod swot;
