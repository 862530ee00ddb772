//! SWOT module - the structured data model shared by every analysis mode.
//!
//! Value objects (`ScoreSet`, `SummaryLists`, `AnalysisSubject`), the typed
//! result variants, the fixed fallback results and the finished report.

mod category;
mod fallback;
mod mode;
mod report;
mod result;
mod scores;
mod subject;
mod summary;

pub use category::SwotCategory;
pub use fallback::fallback_for;
pub use mode::AnalysisMode;
pub use report::AnalysisReport;
pub use result::{
    AnalysisResult, BranchResult, DiscountComparisonRow, LocationAnalysis, MultiResult,
    PairwiseResult, PriceComparisonRow, PriceValue, RankingEntry, ScoredSubject, ShopAnalysis,
    SingleResult, SPECIFIC_BRANCH,
};
pub use scores::{ScoreSet, MAX_SCORE, MIN_SCORE};
pub use subject::AnalysisSubject;
pub use summary::{SummaryLists, DISPLAY_ITEMS, EXPORT_ITEMS};
