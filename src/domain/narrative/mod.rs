//! Narrative module - the human-readable part of a model reply.

mod cleaner;

pub use cleaner::{CleaningRule, NarrativeCleaner};
