//! Tabular flattening shared by the CSV and XLSX exporters.

use std::fmt;

use crate::domain::swot::{AnalysisReport, AnalysisResult, PriceValue, SwotCategory};

/// One spreadsheet cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }
}

impl From<&PriceValue> for Cell {
    fn from(value: &PriceValue) -> Self {
        match value {
            PriceValue::Amount(v) => Cell::Number(*v),
            PriceValue::Label(s) => Cell::Text(s.clone()),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(s) => write!(f, "{}", s),
            Cell::Number(v) => write!(f, "{}", PriceValue::Amount(*v)),
        }
    }
}

/// A named table with a fixed header row.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub name: &'static str,
    pub headers: &'static [&'static str],
    pub rows: Vec<Vec<Cell>>,
}

/// One summary bullet of one subject, as written to flat exports.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailRow {
    pub subject: String,
    pub category: SwotCategory,
    /// 1-based position within the category.
    pub order: usize,
    pub detail: String,
    pub score: u8,
}

pub const DETAIL_HEADERS: &[&str] = &[
    "subject", "category", "type", "impact", "order", "detail", "score", "analyzed_date",
];

/// Every subject's bullets, capped at the export length per category.
pub fn detail_rows(result: &AnalysisResult) -> Vec<DetailRow> {
    let mut rows = Vec::new();
    for subject in result.scored_subjects() {
        for &category in SwotCategory::all() {
            for (i, item) in subject.summary.for_export(category).iter().enumerate() {
                rows.push(DetailRow {
                    subject: subject.name.clone(),
                    category,
                    order: i + 1,
                    detail: item.clone(),
                    score: subject.scores.get(category),
                });
            }
        }
    }
    rows
}

/// All sheets for a report: scores and details always, then whatever
/// extras the result variant carries.
pub fn sheets(report: &AnalysisReport, analyzed_date: &str) -> Vec<Sheet> {
    let mut sheets = vec![scores_sheet(&report.result), details_sheet(&report.result, analyzed_date)];

    if let AnalysisResult::Branch(branch) = &report.result {
        let la = &branch.location_analysis;
        let pairs = [
            ("Brand", branch.brand_name.clone()),
            ("Branch", branch.branch_location.clone()),
            ("Analysis type", branch.analysis_type.clone()),
            ("Area characteristics", la.area_characteristics.clone()),
            ("Target customers", la.target_customers.clone()),
            ("Traffic level", la.traffic_level.clone()),
            ("Nearby competitors", la.nearby_competitors.join(", ")),
        ];
        sheets.push(Sheet {
            name: "Location",
            headers: &["Field", "Value"],
            rows: pairs
                .into_iter()
                .map(|(k, v)| vec![Cell::text(k), Cell::Text(v)])
                .collect(),
        });
    }

    let strategy_rows: Vec<Vec<Cell>> = report
        .result
        .strategy_sections()
        .into_iter()
        .flat_map(|(section, items)| {
            items.iter().enumerate().map(move |(i, item)| {
                vec![
                    Cell::text(section),
                    Cell::Number((i + 1) as f64),
                    Cell::text(item.as_str()),
                ]
            })
        })
        .collect();
    if !strategy_rows.is_empty() {
        sheets.push(Sheet {
            name: "Strategies",
            headers: &["Section", "#", "Strategy"],
            rows: strategy_rows,
        });
    }

    match &report.result {
        AnalysisResult::Multi(multi) if !multi.ranking.is_empty() => sheets.push(Sheet {
            name: "Ranking",
            headers: &["Rank", "Name", "Total score", "Note"],
            rows: multi
                .ranking
                .iter()
                .map(|r| {
                    vec![
                        Cell::Number(f64::from(r.rank)),
                        Cell::text(r.name.as_str()),
                        Cell::Number(r.total_score),
                        Cell::text(r.note.as_str()),
                    ]
                })
                .collect(),
        }),
        AnalysisResult::Pairwise(pair) => {
            if !pair.price_comparison.is_empty() {
                sheets.push(Sheet {
                    name: "Price_Comparison",
                    headers: &["Product", "Price A", "Price B", "Difference", "Note"],
                    rows: pair
                        .price_comparison
                        .iter()
                        .map(|p| {
                            vec![
                                Cell::text(p.product.as_str()),
                                Cell::from(&p.price_a),
                                Cell::from(&p.price_b),
                                p.difference.as_ref().map(Cell::from).unwrap_or_else(|| Cell::text("")),
                                Cell::text(p.note.as_str()),
                            ]
                        })
                        .collect(),
                });
            }
            if !pair.discount_comparison.is_empty() {
                sheets.push(Sheet {
                    name: "Discount_Comparison",
                    headers: &["Program", "Shop A", "Shop B", "Note"],
                    rows: pair
                        .discount_comparison
                        .iter()
                        .map(|d| {
                            vec![
                                Cell::text(d.program.as_str()),
                                Cell::text(d.shop_a.as_str()),
                                Cell::text(d.shop_b.as_str()),
                                Cell::text(d.note.as_str()),
                            ]
                        })
                        .collect(),
                });
            }
        }
        _ => {}
    }

    sheets
}

fn scores_sheet(result: &AnalysisResult) -> Sheet {
    Sheet {
        name: "Scores",
        headers: &[
            "Subject",
            "Strengths",
            "Weaknesses",
            "Opportunities",
            "Threats",
            "Total",
            "Overall",
        ],
        rows: result
            .scored_subjects()
            .into_iter()
            .map(|s| {
                let mut row = vec![Cell::Text(s.name)];
                row.extend(s.scores.iter().map(|(_, v)| Cell::Number(f64::from(v))));
                row.push(Cell::Number(f64::from(s.scores.total())));
                row.push(Cell::Number(s.scores.overall()));
                row
            })
            .collect(),
    }
}

fn details_sheet(result: &AnalysisResult, analyzed_date: &str) -> Sheet {
    Sheet {
        name: "Details",
        headers: &[
            "Subject", "Category", "Type", "Impact", "Order", "Detail", "Score", "Analyzed date",
        ],
        rows: detail_rows(result)
            .into_iter()
            .map(|d| detail_cells(d, analyzed_date))
            .collect(),
    }
}

pub fn detail_cells(row: DetailRow, analyzed_date: &str) -> Vec<Cell> {
    vec![
        Cell::Text(row.subject),
        Cell::text(row.category.label()),
        Cell::text(row.category.factor_type()),
        Cell::text(row.category.impact()),
        Cell::Number(row.order as f64),
        Cell::Text(row.detail),
        Cell::Number(f64::from(row.score)),
        Cell::text(analyzed_date),
    ]
}
