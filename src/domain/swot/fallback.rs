//! Fixed per-mode results substituted when a reply carries no usable block.

use once_cell::sync::Lazy;

use super::{
    AnalysisMode, AnalysisResult, BranchResult, LocationAnalysis, MultiResult, PairwiseResult,
    RankingEntry, ScoreSet, ShopAnalysis, SingleResult, SummaryLists, SPECIFIC_BRANCH,
};

const UNKNOWN: &str = "Unknown";
const YOUR_SHOP: &str = "Your shop";
const COMPETITOR: &str = "Competitor";
const COMPETITOR_1: &str = "Competitor 1";

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn placeholder_summary() -> SummaryLists {
    SummaryLists::new(
        ["Strong brand", "Good location", "Diverse menu"],
        ["High prices", "Limited space", "Long waiting time"],
        ["Market expansion", "Delivery", "Digital marketing"],
        ["Competition", "Rising costs", "Changing trends"],
    )
}

fn placeholder_shop(name: &str) -> ShopAnalysis {
    ShopAnalysis {
        name: name.to_string(),
        scores: ScoreSet::fallback(),
        summary: placeholder_summary(),
    }
}

fn placeholder_strategies() -> Vec<String> {
    strings(&["Focus on quality", "Smart promotions", "Build a community"])
}

static SINGLE: Lazy<AnalysisResult> = Lazy::new(|| {
    AnalysisResult::Single(SingleResult {
        shop_name: UNKNOWN.to_string(),
        scores: ScoreSet::fallback(),
        summary: placeholder_summary(),
    })
});

static BRANCH: Lazy<AnalysisResult> = Lazy::new(|| {
    AnalysisResult::Branch(BranchResult {
        brand_name: UNKNOWN.to_string(),
        branch_location: UNKNOWN.to_string(),
        analysis_type: SPECIFIC_BRANCH.to_string(),
        scores: ScoreSet::fallback(),
        location_analysis: LocationAnalysis {
            area_characteristics: "Not determined".to_string(),
            target_customers: "Not determined".to_string(),
            nearby_competitors: strings(&[COMPETITOR_1, "Competitor 2"]),
            traffic_level: "Medium".to_string(),
        },
        summary: placeholder_summary(),
        local_strategies: strings(&[
            "Focus on local customers",
            "Area-specific promotions",
            "Local partnerships",
        ]),
    })
});

fn pairwise(detected_shops: Vec<String>) -> AnalysisResult {
    AnalysisResult::Pairwise(PairwiseResult {
        detected_shops,
        my_shop: placeholder_shop(YOUR_SHOP),
        competitor: placeholder_shop(COMPETITOR),
        competitive_advantages: strings(&["Higher quality", "Better service"]),
        areas_to_improve: strings(&["Competitive pricing", "Stronger marketing"]),
        strategies: placeholder_strategies(),
        price_comparison: Vec::new(),
        discount_comparison: Vec::new(),
    })
}

static PAIRWISE: Lazy<AnalysisResult> = Lazy::new(|| pairwise(Vec::new()));

static AUTO_DETECT: Lazy<AnalysisResult> =
    Lazy::new(|| pairwise(strings(&[YOUR_SHOP, COMPETITOR])));

static MULTI: Lazy<AnalysisResult> = Lazy::new(|| {
    let total = f64::from(ScoreSet::fallback().total());
    let ranking = [YOUR_SHOP, COMPETITOR_1]
        .iter()
        .enumerate()
        .map(|(i, name)| RankingEntry {
            rank: i as u32 + 1,
            name: name.to_string(),
            total_score: total,
            note: "Placeholder ranking".to_string(),
        })
        .collect();

    AnalysisResult::Multi(MultiResult {
        my_shop: placeholder_shop(YOUR_SHOP),
        competitors: vec![placeholder_shop(COMPETITOR_1)],
        ranking,
        strategies: placeholder_strategies(),
    })
});

/// Returns the fixed fallback result for a mode.
pub fn fallback_for(mode: AnalysisMode) -> &'static AnalysisResult {
    match mode {
        AnalysisMode::Single => &SINGLE,
        AnalysisMode::Branch => &BRANCH,
        AnalysisMode::Pairwise => &PAIRWISE,
        AnalysisMode::AutoDetect => &AUTO_DETECT,
        AnalysisMode::Multi => &MULTI,
    }
}
