//! SwotCategory enum representing the four SWOT quadrants.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The four SWOT quadrants in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwotCategory {
    Strengths,
    Weaknesses,
    Opportunities,
    Threats,
}

impl SwotCategory {
    /// Returns all categories in canonical order.
    pub fn all() -> &'static [SwotCategory] {
        &[
            SwotCategory::Strengths,
            SwotCategory::Weaknesses,
            SwotCategory::Opportunities,
            SwotCategory::Threats,
        ]
    }

    /// Key used in the structured block (`"strengths"`, ...).
    pub fn key(&self) -> &'static str {
        match self {
            SwotCategory::Strengths => "strengths",
            SwotCategory::Weaknesses => "weaknesses",
            SwotCategory::Opportunities => "opportunities",
            SwotCategory::Threats => "threats",
        }
    }

    /// Returns the display label.
    pub fn label(&self) -> &'static str {
        match self {
            SwotCategory::Strengths => "Strengths",
            SwotCategory::Weaknesses => "Weaknesses",
            SwotCategory::Opportunities => "Opportunities",
            SwotCategory::Threats => "Threats",
        }
    }

    /// Strengths and weaknesses describe the business itself.
    pub fn is_internal(&self) -> bool {
        matches!(self, SwotCategory::Strengths | SwotCategory::Weaknesses)
    }

    /// "Internal" or "External", as written in exported score sheets.
    pub fn factor_type(&self) -> &'static str {
        if self.is_internal() {
            "Internal"
        } else {
            "External"
        }
    }

    /// Strengths and opportunities help; weaknesses and threats hurt.
    pub fn impact(&self) -> &'static str {
        match self {
            SwotCategory::Strengths | SwotCategory::Opportunities => "Positive",
            SwotCategory::Weaknesses | SwotCategory::Threats => "Negative",
        }
    }
}

impl fmt::Display for SwotCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
