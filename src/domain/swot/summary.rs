//! SummaryLists value object: short bullet items per SWOT category.

use serde::{Deserialize, Serialize};

use super::SwotCategory;

/// Items shown per category on screen.
pub const DISPLAY_ITEMS: usize = 3;

/// Items written per category into exported reports.
pub const EXPORT_ITEMS: usize = 5;

/// Ordered bullet items for each SWOT category.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SummaryLists {
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub opportunities: Vec<String>,
    pub threats: Vec<String>,
}

impl SummaryLists {
    /// Creates summary lists from anything string-like.
    pub fn new<S: Into<String>>(
        strengths: impl IntoIterator<Item = S>,
        weaknesses: impl IntoIterator<Item = S>,
        opportunities: impl IntoIterator<Item = S>,
        threats: impl IntoIterator<Item = S>,
    ) -> Self {
        fn collect<S: Into<String>>(items: impl IntoIterator<Item = S>) -> Vec<String> {
            items.into_iter().map(Into::into).collect()
        }

        Self {
            strengths: collect(strengths),
            weaknesses: collect(weaknesses),
            opportunities: collect(opportunities),
            threats: collect(threats),
        }
    }

    /// Returns all items for a category.
    pub fn get(&self, category: SwotCategory) -> &[String] {
        match category {
            SwotCategory::Strengths => &self.strengths,
            SwotCategory::Weaknesses => &self.weaknesses,
            SwotCategory::Opportunities => &self.opportunities,
            SwotCategory::Threats => &self.threats,
        }
    }

    /// First [`DISPLAY_ITEMS`] items of a category.
    pub fn for_display(&self, category: SwotCategory) -> &[String] {
        truncated(self.get(category), DISPLAY_ITEMS)
    }

    /// First [`EXPORT_ITEMS`] items of a category.
    pub fn for_export(&self, category: SwotCategory) -> &[String] {
        truncated(self.get(category), EXPORT_ITEMS)
    }

    /// Categories whose list is empty.
    pub fn empty_categories(&self) -> Vec<SwotCategory> {
        SwotCategory::all()
            .iter()
            .copied()
            .filter(|c| self.get(*c).is_empty())
            .collect()
    }
}

fn truncated(items: &[String], limit: usize) -> &[String] {
    &items[..items.len().min(limit)]
}
