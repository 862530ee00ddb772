//! Extraction module - from a free-text model reply to a typed result.
//!
//! Two passes: a literal scanner locates the first ```json block, then a
//! JSON parse coerces it into the typed variant for the mode.

mod extractor;
mod scanner;

pub use extractor::{Extraction, ExtractionOutcome, FallbackReason, ResponseExtractor};
pub use scanner::{fenced_blocks, first_json_block, FencedBlock, FencedBlocks, FENCE, JSON_FENCE};
