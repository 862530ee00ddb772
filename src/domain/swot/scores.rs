//! ScoreSet value object: one 1-10 score per SWOT category.

use serde::{Deserialize, Serialize};

use super::SwotCategory;
use crate::domain::foundation::ValidationError;

/// Lowest score the prompt contract allows.
pub const MIN_SCORE: u8 = 1;

/// Highest score the prompt contract allows.
pub const MAX_SCORE: u8 = 10;

/// Scores for the four SWOT categories.
///
/// All four keys are required when a structured block is parsed; a block
/// missing one of them does not coerce into a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScoreSet {
    pub strengths: u8,
    pub weaknesses: u8,
    pub opportunities: u8,
    pub threats: u8,
}

impl ScoreSet {
    /// Creates a score set.
    pub fn new(strengths: u8, weaknesses: u8, opportunities: u8, threats: u8) -> Self {
        Self {
            strengths,
            weaknesses,
            opportunities,
            threats,
        }
    }

    /// The documented placeholder scores: 7 / 5 / 6 / 4.
    pub fn fallback() -> Self {
        Self::new(7, 5, 6, 4)
    }

    /// Returns the score for a category.
    pub fn get(&self, category: SwotCategory) -> u8 {
        match category {
            SwotCategory::Strengths => self.strengths,
            SwotCategory::Weaknesses => self.weaknesses,
            SwotCategory::Opportunities => self.opportunities,
            SwotCategory::Threats => self.threats,
        }
    }

    /// Iterates `(category, score)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (SwotCategory, u8)> + '_ {
        SwotCategory::all().iter().map(move |c| (*c, self.get(*c)))
    }

    /// Sum of all four scores.
    pub fn total(&self) -> u32 {
        self.iter().map(|(_, s)| u32::from(s)).sum()
    }

    /// Net position on a 0-10 scale: positives minus negatives, shifted and
    /// rounded to one decimal.
    pub fn overall(&self) -> f64 {
        let net = f64::from(self.strengths) + f64::from(self.opportunities)
            - f64::from(self.weaknesses)
            - f64::from(self.threats);
        ((net + 20.0) / 4.0 * 10.0).round() / 10.0
    }

    /// Checks every score against the 1-10 range requested of the model.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (category, score) in self.iter() {
            if !(MIN_SCORE..=MAX_SCORE).contains(&score) {
                return Err(ValidationError::out_of_range(
                    category.key(),
                    i64::from(MIN_SCORE),
                    i64::from(MAX_SCORE),
                    i64::from(score),
                ));
            }
        }
        Ok(())
    }
}

impl Default for ScoreSet {
    fn default() -> Self {
        Self::fallback()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_matches_documented_values() {
        let scores = ScoreSet::fallback();
        assert_eq!(scores.strengths, 7);
        assert_eq!(scores.weaknesses, 5);
        assert_eq!(scores.opportunities, 6);
        assert_eq!(scores.threats, 4);
        assert_eq!(ScoreSet::default(), scores);
    }

    #[test]
    fn get_and_total() {
        let scores = ScoreSet::new(9, 3, 8, 2);
        assert_eq!(scores.get(SwotCategory::Opportunities), 8);
        assert_eq!(scores.total(), 22);
    }

    #[test]
    fn overall_nets_positives_against_negatives() {
        assert_eq!(ScoreSet::fallback().overall(), 6.0);
        assert_eq!(ScoreSet::new(9, 3, 8, 2).overall(), 8.0);
        assert_eq!(ScoreSet::new(1, 10, 1, 10).overall(), 0.5);
    }

    #[test]
    fn validate_rejects_out_of_range() {
        assert!(ScoreSet::new(9, 3, 8, 2).validate().is_ok());
        let err = ScoreSet::new(11, 3, 8, 2).validate().unwrap_err();
        assert_eq!(err.field(), "strengths");
        assert!(ScoreSet::new(5, 0, 8, 2).validate().is_err());
    }

    #[test]
    fn deserialize_requires_all_keys() {
        let partial = serde_json::json!({"strengths": 9, "weaknesses": 3, "opportunities": 8});
        assert!(serde_json::from_value::<ScoreSet>(partial).is_err());
    }

    #[test]
    fn deserialize_rejects_fractional_scores() {
        let fractional = serde_json::json!({
            "strengths": 7.5, "weaknesses": 3, "opportunities": 8, "threats": 2
        });
        assert!(serde_json::from_value::<ScoreSet>(fractional).is_err());
    }
}
