//! AnalysisReport: what the presentation and export layers consume.

use serde::{Deserialize, Serialize};

use super::{AnalysisMode, AnalysisResult};

/// A finished analysis: the structured result and the cleaned narrative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub mode: AnalysisMode,
    pub result: AnalysisResult,
    pub narrative: String,
    /// Set when the result is the fallback rather than the model's block.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<String>,
}

impl AnalysisReport {
    pub fn new(mode: AnalysisMode, result: AnalysisResult, narrative: impl Into<String>) -> Self {
        Self {
            mode,
            result,
            narrative: narrative.into(),
            fallback_reason: None,
        }
    }

    pub fn with_fallback_reason(mut self, reason: impl Into<String>) -> Self {
        self.fallback_reason = Some(reason.into());
        self
    }

    /// Name used in export file names: the first scored subject.
    pub fn title(&self) -> String {
        self.result
            .scored_subjects()
            .into_iter()
            .next()
            .map(|s| s.name)
            .unwrap_or_else(|| self.mode.key().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::swot::fallback_for;

    #[test]
    fn title_uses_first_subject() {
        let report = AnalysisReport::new(
            AnalysisMode::Branch,
            fallback_for(AnalysisMode::Branch).clone(),
            "",
        );
        assert_eq!(report.title(), "Unknown - Unknown");
    }

    #[test]
    fn json_round_trip_keeps_variant() {
        let report = AnalysisReport::new(
            AnalysisMode::Multi,
            fallback_for(AnalysisMode::Multi).clone(),
            "narrative",
        )
        .with_fallback_reason("no fenced json block in the reply");
        let json = serde_json::to_string(&report).unwrap();
        let back: AnalysisReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back, report);
    }

    #[test]
    fn fallback_reason_is_omitted_when_absent() {
        let report = AnalysisReport::new(
            AnalysisMode::Single,
            fallback_for(AnalysisMode::Single).clone(),
            "text",
        );
        let value = serde_json::to_value(&report).unwrap();
        assert!(value.get("fallback_reason").is_none());
        assert_eq!(value["mode"], "single");
        assert_eq!(value["result"]["shop_name"], "Unknown");
    }
}
