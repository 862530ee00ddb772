//! AnalysisMode enum selecting the prompt contract and result shape.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// The analysis variants supported by the prompt-response contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisMode {
    /// One shop, optionally backed by uploaded data.
    Single,
    /// One branch of a brand at a named location.
    Branch,
    /// My shop against one named competitor.
    Pairwise,
    /// Two-shop comparison where the shop names come from the data itself.
    AutoDetect,
    /// My shop against several competitors, with a ranking.
    Multi,
}

impl AnalysisMode {
    /// Returns all modes.
    pub fn all() -> &'static [AnalysisMode] {
        &[
            AnalysisMode::Single,
            AnalysisMode::Branch,
            AnalysisMode::Pairwise,
            AnalysisMode::AutoDetect,
            AnalysisMode::Multi,
        ]
    }

    /// Wire name of the mode.
    pub fn key(&self) -> &'static str {
        match self {
            AnalysisMode::Single => "single",
            AnalysisMode::Branch => "branch",
            AnalysisMode::Pairwise => "pairwise",
            AnalysisMode::AutoDetect => "auto_detect",
            AnalysisMode::Multi => "multi",
        }
    }

    /// Returns true if the mode compares more than one shop.
    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            AnalysisMode::Pairwise | AnalysisMode::AutoDetect | AnalysisMode::Multi
        )
    }
}

impl fmt::Display for AnalysisMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for AnalysisMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        AnalysisMode::all()
            .iter()
            .copied()
            .find(|m| m.key() == normalized)
            .ok_or_else(|| {
                ValidationError::invalid_format("mode", format!("unknown analysis mode '{}'", s))
            })
    }
}
