//! Typed analysis results, one variant per result shape.
//!
//! Every struct here is the exact shape of the structured block the model is
//! asked to return. Fields without `#[serde(default)]` are required: a block
//! that lacks them does not coerce and the extractor falls back.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{AnalysisMode, ScoreSet, SummaryLists};

/// Analysis of a single shop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SingleResult {
    pub shop_name: String,
    pub scores: ScoreSet,
    pub summary: SummaryLists,
}

/// Location facts reported for branch-level analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationAnalysis {
    pub area_characteristics: String,
    pub target_customers: String,
    pub nearby_competitors: Vec<String>,
    pub traffic_level: String,
}

/// Analysis of one branch of a brand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchResult {
    pub brand_name: String,
    pub branch_location: String,
    #[serde(default = "specific_branch")]
    pub analysis_type: String,
    pub scores: ScoreSet,
    pub location_analysis: LocationAnalysis,
    pub summary: SummaryLists,
    pub local_strategies: Vec<String>,
}

/// Value written under `analysis_type` for branch results.
pub const SPECIFIC_BRANCH: &str = "specific_branch";

fn specific_branch() -> String {
    SPECIFIC_BRANCH.to_string()
}

/// Scores and bullets for one shop inside a comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShopAnalysis {
    pub name: String,
    pub scores: ScoreSet,
    pub summary: SummaryLists,
}

/// A price the model reported, either numeric or as free text ("45.000d").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PriceValue {
    Amount(f64),
    Label(String),
}

impl fmt::Display for PriceValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriceValue::Amount(v) if v.fract() == 0.0 && v.abs() < 1e15 => {
                write!(f, "{}", *v as i64)
            }
            PriceValue::Amount(v) => write!(f, "{}", v),
            PriceValue::Label(s) => write!(f, "{}", s),
        }
    }
}

/// One product row in a price comparison table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceComparisonRow {
    pub product: String,
    pub price_a: PriceValue,
    pub price_b: PriceValue,
    #[serde(default)]
    pub difference: Option<PriceValue>,
    #[serde(default)]
    pub note: String,
}

/// One promotion row in a discount comparison table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountComparisonRow {
    pub program: String,
    pub shop_a: String,
    pub shop_b: String,
    #[serde(default)]
    pub note: String,
}

/// Two-shop comparison; also the shape of auto-detected comparisons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairwiseResult {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub detected_shops: Vec<String>,
    pub my_shop: ShopAnalysis,
    pub competitor: ShopAnalysis,
    pub competitive_advantages: Vec<String>,
    pub areas_to_improve: Vec<String>,
    pub strategies: Vec<String>,
    #[serde(default)]
    pub price_comparison: Vec<PriceComparisonRow>,
    #[serde(default)]
    pub discount_comparison: Vec<DiscountComparisonRow>,
}

/// One line of the multi-shop ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingEntry {
    pub rank: u32,
    pub name: String,
    pub total_score: f64,
    #[serde(default)]
    pub note: String,
}

/// My shop against several competitors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiResult {
    pub my_shop: ShopAnalysis,
    pub competitors: Vec<ShopAnalysis>,
    pub ranking: Vec<RankingEntry>,
    #[serde(default)]
    pub strategies: Vec<String>,
}

/// The structured outcome of one analysis.
///
/// Serialized untagged so that the JSON matches the structured block itself.
/// Variant order matters for deserialization: the more specific shapes come
/// first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnalysisResult {
    Branch(BranchResult),
    Multi(MultiResult),
    Pairwise(PairwiseResult),
    Single(SingleResult),
}

/// A scored entity flattened out of any result variant.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredSubject<'a> {
    pub name: String,
    pub scores: &'a ScoreSet,
    pub summary: &'a SummaryLists,
}

impl AnalysisResult {
    /// Returns true if the variant is the shape `mode` produces.
    pub fn matches_mode(&self, mode: AnalysisMode) -> bool {
        matches!(
            (self, mode),
            (AnalysisResult::Single(_), AnalysisMode::Single)
                | (AnalysisResult::Branch(_), AnalysisMode::Branch)
                | (AnalysisResult::Pairwise(_), AnalysisMode::Pairwise)
                | (AnalysisResult::Pairwise(_), AnalysisMode::AutoDetect)
                | (AnalysisResult::Multi(_), AnalysisMode::Multi)
        )
    }

    /// Every scored entity in report order: my shop first, then competitors.
    pub fn scored_subjects(&self) -> Vec<ScoredSubject<'_>> {
        fn shop(s: &ShopAnalysis) -> ScoredSubject<'_> {
            ScoredSubject {
                name: s.name.clone(),
                scores: &s.scores,
                summary: &s.summary,
            }
        }

        match self {
            AnalysisResult::Single(r) => vec![ScoredSubject {
                name: r.shop_name.clone(),
                scores: &r.scores,
                summary: &r.summary,
            }],
            AnalysisResult::Branch(r) => vec![ScoredSubject {
                name: format!("{} - {}", r.brand_name, r.branch_location),
                scores: &r.scores,
                summary: &r.summary,
            }],
            AnalysisResult::Pairwise(r) => vec![shop(&r.my_shop), shop(&r.competitor)],
            AnalysisResult::Multi(r) => std::iter::once(&r.my_shop)
                .chain(r.competitors.iter())
                .map(shop)
                .collect(),
        }
    }

    /// Labelled strategy lists carried by the variant, if any.
    pub fn strategy_sections(&self) -> Vec<(&'static str, &[String])> {
        match self {
            AnalysisResult::Single(_) => Vec::new(),
            AnalysisResult::Branch(r) => vec![("Local strategies", r.local_strategies.as_slice())],
            AnalysisResult::Pairwise(r) => vec![
                ("Competitive advantages", r.competitive_advantages.as_slice()),
                ("Areas to improve", r.areas_to_improve.as_slice()),
                ("Strategies", r.strategies.as_slice()),
            ],
            AnalysisResult::Multi(r) => vec![("Strategies", r.strategies.as_slice())],
        }
    }
}

impl From<SingleResult> for AnalysisResult {
    fn from(r: SingleResult) -> Self {
        AnalysisResult::Single(r)
    }
}

impl From<BranchResult> for AnalysisResult {
    fn from(r: BranchResult) -> Self {
        AnalysisResult::Branch(r)
    }
}

impl From<PairwiseResult> for AnalysisResult {
    fn from(r: PairwiseResult) -> Self {
        AnalysisResult::Pairwise(r)
    }
}

impl From<MultiResult> for AnalysisResult {
    fn from(r: MultiResult) -> Self {
        AnalysisResult::Multi(r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn summary_json() -> serde_json::Value {
        json!({"strengths": ["a"], "weaknesses": ["b"], "opportunities": ["c"], "threats": ["d"]})
    }

    fn scores_json() -> serde_json::Value {
        json!({"strengths": 9, "weaknesses": 3, "opportunities": 8, "threats": 2})
    }

    mod coercion {
        use super::*;

        #[test]
        fn single_result_requires_shop_name() {
            let value = json!({"scores": scores_json(), "summary": summary_json()});
            assert!(serde_json::from_value::<SingleResult>(value).is_err());
        }

        #[test]
        fn branch_result_defaults_analysis_type() {
            let value = json!({
                "brand_name": "Highlands",
                "branch_location": "District 1",
                "scores": scores_json(),
                "location_analysis": {
                    "area_characteristics": "Offices",
                    "target_customers": "Workers",
                    "nearby_competitors": ["Starbucks"],
                    "traffic_level": "High"
                },
                "summary": summary_json(),
                "local_strategies": ["Lunch combos"]
            });
            let result: BranchResult = serde_json::from_value(value).unwrap();
            assert_eq!(result.analysis_type, SPECIFIC_BRANCH);
        }

        #[test]
        fn pairwise_tables_default_to_empty() {
            let value = json!({
                "my_shop": {"name": "A", "scores": scores_json(), "summary": summary_json()},
                "competitor": {"name": "B", "scores": scores_json(), "summary": summary_json()},
                "competitive_advantages": ["x"],
                "areas_to_improve": ["y"],
                "strategies": ["z"]
            });
            let result: PairwiseResult = serde_json::from_value(value).unwrap();
            assert!(result.price_comparison.is_empty());
            assert!(result.discount_comparison.is_empty());
            assert!(result.detected_shops.is_empty());
        }

        #[test]
        fn price_values_accept_numbers_and_text() {
            let row: PriceComparisonRow = serde_json::from_value(json!({
                "product": "Latte",
                "price_a": 45000,
                "price_b": "49.000d"
            }))
            .unwrap();
            assert_eq!(row.price_a, PriceValue::Amount(45000.0));
            assert_eq!(row.price_a.to_string(), "45000");
            assert_eq!(row.price_b.to_string(), "49.000d");
            assert_eq!(row.difference, None);
        }
    }

    mod views {
        use super::*;

        fn shop(name: &str) -> ShopAnalysis {
            ShopAnalysis {
                name: name.to_string(),
                scores: ScoreSet::new(8, 4, 7, 3),
                summary: SummaryLists::new(["s"], ["w"], ["o"], ["t"]),
            }
        }

        #[test]
        fn multi_subjects_list_my_shop_first() {
            let result = AnalysisResult::Multi(MultiResult {
                my_shop: shop("Mine"),
                competitors: vec![shop("C1"), shop("C2")],
                ranking: vec![],
                strategies: vec![],
            });
            let names: Vec<_> = result.scored_subjects().into_iter().map(|s| s.name).collect();
            assert_eq!(names, vec!["Mine", "C1", "C2"]);
        }

        #[test]
        fn pairwise_matches_auto_detect_mode() {
            let result = AnalysisResult::Pairwise(PairwiseResult {
                detected_shops: vec![],
                my_shop: shop("A"),
                competitor: shop("B"),
                competitive_advantages: vec![],
                areas_to_improve: vec![],
                strategies: vec![],
                price_comparison: vec![],
                discount_comparison: vec![],
            });
            assert!(result.matches_mode(AnalysisMode::AutoDetect));
            assert!(result.matches_mode(AnalysisMode::Pairwise));
            assert!(!result.matches_mode(AnalysisMode::Multi));
            assert_eq!(result.strategy_sections().len(), 3);
        }

        #[test]
        fn untagged_serialization_matches_block_shape() {
            let result = AnalysisResult::Single(SingleResult {
                shop_name: "Cafe X".to_string(),
                scores: ScoreSet::new(9, 3, 8, 2),
                summary: SummaryLists::new(["a"], ["b"], ["c"], ["d"]),
            });
            let value = serde_json::to_value(&result).unwrap();
            assert_eq!(
                value,
                json!({"shop_name": "Cafe X", "scores": scores_json(), "summary": summary_json()})
            );
            let back: AnalysisResult = serde_json::from_value(value).unwrap();
            assert_eq!(back, result);
        }
    }
}
