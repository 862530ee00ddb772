//! Context summarizer: a compact textual digest of datasets for prompts.

use super::{CellValue, Dataset, NumericStats};

/// Rows shown per dataset unless configured otherwise.
pub const DEFAULT_SAMPLE_ROWS: usize = 5;

/// Controls how much of each dataset reaches the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryOptions {
    /// Leading rows rendered per dataset.
    pub sample_rows: usize,
    /// Render every row instead of a sample.
    pub full_content: bool,
}

impl Default for SummaryOptions {
    fn default() -> Self {
        Self {
            sample_rows: DEFAULT_SAMPLE_ROWS,
            full_content: false,
        }
    }
}

impl SummaryOptions {
    /// Same options with the full dataset content embedded.
    pub fn with_full_content(mut self) -> Self {
        self.full_content = true;
        self
    }
}

/// Turns datasets into prompt context text.
///
/// Pure and deterministic: the same datasets always yield the same string.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContextSummarizer {
    options: SummaryOptions,
}

impl ContextSummarizer {
    pub fn new(options: SummaryOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> SummaryOptions {
        self.options
    }

    /// Summarizes zero or more datasets. Zero datasets yield an empty string.
    pub fn summarize(&self, datasets: &[Dataset]) -> String {
        if datasets.is_empty() {
            return String::new();
        }

        let mut out = if datasets.len() == 1 {
            String::from("DATA FROM CSV:\n")
        } else {
            format!("DATA FROM MULTIPLE FILES ({}):\n", datasets.len())
        };

        for dataset in datasets {
            self.write_dataset(&mut out, dataset);
        }

        out
    }

    fn write_dataset(&self, out: &mut String, dataset: &Dataset) {
        out.push_str(&format!("\n--- File: {} ---\n", dataset.source()));
        out.push_str(&format!("Rows: {}\n", dataset.row_count()));
        out.push_str(&format!("Columns: {}\n", dataset.column_names().join(", ")));

        for column in dataset.columns() {
            if let Some(stats) = column.numeric_stats() {
                out.push_str(&format!("- {}: {}\n", column.name, format_stats(&stats)));
            }
        }

        let shown = if self.options.full_content {
            dataset.row_count()
        } else {
            self.options.sample_rows.min(dataset.row_count())
        };

        if self.options.full_content {
            out.push_str("Full data:\n");
        } else {
            out.push_str("Sample data:\n");
        }
        out.push_str(&render_table(dataset, shown));
    }
}

fn format_stats(stats: &NumericStats) -> String {
    let bound = |v: f64| {
        if stats.integral {
            format!("{}", v as i64)
        } else {
            format!("{}", v)
        }
    };
    format!(
        "min={}, max={}, avg={:.0}",
        bound(stats.min),
        bound(stats.max),
        stats.mean
    )
}

/// Right-aligned text table with a leading row index column.
fn render_table(dataset: &Dataset, rows: usize) -> String {
    let headers: Vec<String> = dataset.column_names().iter().map(|s| s.to_string()).collect();
    if headers.is_empty() {
        return "(no columns)\n".to_string();
    }

    let body: Vec<Vec<String>> = (0..rows)
        .filter_map(|i| dataset.row(i))
        .map(|cells| cells.into_iter().map(CellValue::to_string).collect())
        .collect();

    let index_width = rows.saturating_sub(1).to_string().len();
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            body.iter()
                .map(|r| r[i].chars().count())
                .chain(std::iter::once(h.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    out.push_str(&" ".repeat(index_width));
    for (h, w) in headers.iter().zip(&widths) {
        out.push_str("  ");
        out.push_str(&pad_left(h, *w));
    }
    out.push('\n');

    for (i, row) in body.iter().enumerate() {
        out.push_str(&pad_left(&i.to_string(), index_width));
        for (cell, w) in row.iter().zip(&widths) {
            out.push_str("  ");
            out.push_str(&pad_left(cell, *w));
        }
        out.push('\n');
    }

    out
}

fn pad_left(s: &str, width: usize) -> String {
    let len = s.chars().count();
    format!("{}{}", " ".repeat(width.saturating_sub(len)), s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::context::Column;

    fn menu() -> Dataset {
        Dataset::from_rows(
            "menu.csv",
            vec!["product".into(), "price".into()],
            vec![
                vec!["Latte".into(), "10".into()],
                vec!["Tea".into(), "20".into()],
                vec!["Mocha".into(), "30".into()],
            ],
        )
        .unwrap()
    }

    fn reviews() -> Dataset {
        Dataset::from_rows(
            "reviews.csv",
            vec!["shop".into(), "comment".into()],
            vec![vec!["Cafe X".into(), "Great".into()]],
        )
        .unwrap()
    }

    #[test]
    fn zero_datasets_yield_empty_string() {
        assert_eq!(ContextSummarizer::default().summarize(&[]), "");
    }

    #[test]
    fn numeric_column_statistics() {
        let text = ContextSummarizer::default().summarize(&[menu(), reviews()]);
        assert!(text.contains("min=10"));
        assert!(text.contains("max=30"));
        assert!(text.contains("avg=20"));
        assert!(text.contains("- price: min=10, max=30, avg=20\n"));
    }

    #[test]
    fn multiple_files_header_and_sections() {
        let text = ContextSummarizer::default().summarize(&[menu(), reviews()]);
        assert!(text.starts_with("DATA FROM MULTIPLE FILES (2):\n"));
        assert!(text.contains("--- File: menu.csv ---"));
        assert!(text.contains("--- File: reviews.csv ---"));
        assert!(text.contains("Rows: 3"));
        assert!(text.contains("Columns: shop, comment"));
    }

    #[test]
    fn single_file_header() {
        let text = ContextSummarizer::default().summarize(&[menu()]);
        assert!(text.starts_with("DATA FROM CSV:\n"));
    }

    #[test]
    fn non_numeric_dataset_has_metadata_only() {
        let text = ContextSummarizer::default().summarize(&[reviews()]);
        assert!(!text.contains("min="));
        assert!(text.contains("Rows: 1"));
        assert!(text.contains("Cafe X"));
    }

    #[test]
    fn sample_is_limited_to_configured_rows() {
        let rows = (0..8).map(|i| vec![format!("item{}", i)]).collect();
        let ds = Dataset::from_rows("big.csv", vec!["name".into()], rows).unwrap();
        let text = ContextSummarizer::default().summarize(&[ds.clone()]);
        assert!(text.contains("item4"));
        assert!(!text.contains("item5"));

        let full = ContextSummarizer::new(SummaryOptions::default().with_full_content())
            .summarize(&[ds]);
        assert!(full.contains("Full data:"));
        assert!(full.contains("item7"));
    }

    #[test]
    fn float_bounds_keep_decimals() {
        let ds = Dataset::new(
            "ratings.csv",
            vec![Column::new(
                "rating",
                vec![CellValue::Float(3.5), CellValue::Integer(5)],
            )],
        )
        .unwrap();
        let text = ContextSummarizer::default().summarize(&[ds]);
        assert!(text.contains("- rating: min=3.5, max=5, avg=4\n"));
    }

    #[test]
    fn table_is_right_aligned() {
        let text = ContextSummarizer::default().summarize(&[menu()]);
        assert!(text.contains("  product  price\n0    Latte     10\n"));
    }

    #[test]
    fn output_is_deterministic() {
        let summarizer = ContextSummarizer::default();
        let datasets = vec![menu(), reviews()];
        assert_eq!(summarizer.summarize(&datasets), summarizer.summarize(&datasets));
    }
}
