//! Fixed narrative section markers shared by the prompt and the cleaner.

use crate::domain::swot::SwotCategory;

/// Marker opening the strategy section of a reply.
pub const STRATEGY_MARKER: &str = "💡 STRATEGY";

/// Marker opening the narrative section for a SWOT category.
pub fn category_marker(category: SwotCategory) -> &'static str {
    match category {
        SwotCategory::Strengths => "📗 STRENGTHS",
        SwotCategory::Weaknesses => "📕 WEAKNESSES",
        SwotCategory::Opportunities => "📘 OPPORTUNITIES",
        SwotCategory::Threats => "📙 THREATS",
    }
}

/// The four category markers as a template block, each followed by `: ...`.
pub fn category_outline() -> String {
    SwotCategory::all()
        .iter()
        .map(|c| format!("{}: ...\n", category_marker(*c)))
        .collect()
}
