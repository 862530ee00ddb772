//! Tabular dataset model fed to the context summarizer.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// One typed cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Integer(i64),
    Float(f64),
    Text(String),
    Empty,
}

impl CellValue {
    /// Types a raw text cell: integer, then float, then text. Blank is empty.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return CellValue::Empty;
        }
        if let Ok(i) = trimmed.parse::<i64>() {
            return CellValue::Integer(i);
        }
        match trimmed.parse::<f64>() {
            Ok(f) if f.is_finite() => CellValue::Float(f),
            _ => CellValue::Text(raw.to_string()),
        }
    }

    /// Numeric view of the cell, if it has one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Integer(i) => Some(*i as f64),
            CellValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Integer(i) => write!(f, "{}", i),
            CellValue::Float(v) => write!(f, "{}", v),
            CellValue::Text(s) => write!(f, "{}", s),
            CellValue::Empty => Ok(()),
        }
    }
}

/// A named column of cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub values: Vec<CellValue>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<CellValue>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Min, max and mean of a numeric column; `None` for anything else.
    ///
    /// A column is numeric when it has at least one value and every
    /// non-empty value is an integer or a float.
    pub fn numeric_stats(&self) -> Option<NumericStats> {
        let mut present = self.values.iter().filter(|v| !v.is_empty()).peekable();
        present.peek()?;

        let mut all_integers = true;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut sum = 0.0;
        let mut count = 0usize;

        for value in present {
            if !matches!(value, CellValue::Integer(_)) {
                all_integers = false;
            }
            let n = value.as_f64()?;
            min = min.min(n);
            max = max.max(n);
            sum += n;
            count += 1;
        }

        Some(NumericStats {
            min,
            max,
            mean: sum / count as f64,
            integral: all_integers,
        })
    }
}

/// Summary statistics of a numeric column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    /// Every value was an integer; bounds print without a decimal point.
    pub integral: bool,
}

/// A table with provenance, as read from one uploaded file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    source: String,
    columns: Vec<Column>,
}

impl Dataset {
    /// Creates a dataset from columns of equal length.
    ///
    /// # Errors
    ///
    /// Returns `EmptyField` for a blank source label and `InvalidFormat`
    /// when columns differ in length.
    pub fn new(source: impl Into<String>, columns: Vec<Column>) -> Result<Self, ValidationError> {
        let source = source.into();
        if source.trim().is_empty() {
            return Err(ValidationError::empty_field("source"));
        }
        if let Some(first) = columns.first() {
            let expected = first.values.len();
            if let Some(bad) = columns.iter().find(|c| c.values.len() != expected) {
                return Err(ValidationError::invalid_format(
                    "columns",
                    format!(
                        "column '{}' has {} values, expected {}",
                        bad.name,
                        bad.values.len(),
                        expected
                    ),
                ));
            }
        }
        Ok(Self { source, columns })
    }

    /// Builds a dataset from a header row and raw text rows.
    ///
    /// Short rows are padded with empty cells and long rows are cut to the
    /// header width.
    pub fn from_rows(
        source: impl Into<String>,
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
    ) -> Result<Self, ValidationError> {
        let mut columns: Vec<Column> = headers
            .into_iter()
            .map(|h| Column::new(h, Vec::with_capacity(rows.len())))
            .collect();

        for row in &rows {
            for (i, column) in columns.iter_mut().enumerate() {
                let cell = row.get(i).map(|s| CellValue::parse(s)).unwrap_or(CellValue::Empty);
                column.values.push(cell);
            }
        }

        Self::new(source, columns)
    }

    /// Provenance label, usually the file name.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn row_count(&self) -> usize {
        self.columns.first().map(|c| c.values.len()).unwrap_or(0)
    }

    /// Cells of one row, in column order.
    pub fn row(&self, index: usize) -> Option<Vec<&CellValue>> {
        if index >= self.row_count() {
            return None;
        }
        Some(self.columns.iter().map(|c| &c.values[index]).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod cell_value {
        use super::*;

        #[test]
        fn parse_types_cells() {
            assert_eq!(CellValue::parse("42"), CellValue::Integer(42));
            assert_eq!(CellValue::parse(" 4.5 "), CellValue::Float(4.5));
            assert_eq!(CellValue::parse("Latte"), CellValue::Text("Latte".to_string()));
            assert_eq!(CellValue::parse("   "), CellValue::Empty);
        }

        #[test]
        fn non_finite_floats_stay_text() {
            assert_eq!(CellValue::parse("NaN"), CellValue::Text("NaN".to_string()));
            assert_eq!(CellValue::parse("inf"), CellValue::Text("inf".to_string()));
        }

        #[test]
        fn display_prints_integers_without_decimals() {
            assert_eq!(CellValue::Integer(10).to_string(), "10");
            assert_eq!(CellValue::Float(10.5).to_string(), "10.5");
            assert_eq!(CellValue::Empty.to_string(), "");
        }
    }

    mod numeric_stats {
        use super::*;

        #[test]
        fn integer_column() {
            let column = Column::new(
                "price",
                vec![CellValue::Integer(10), CellValue::Integer(20), CellValue::Integer(30)],
            );
            let stats = column.numeric_stats().unwrap();
            assert_eq!(stats.min, 10.0);
            assert_eq!(stats.max, 30.0);
            assert_eq!(stats.mean, 20.0);
            assert!(stats.integral);
        }

        #[test]
        fn empty_cells_are_skipped() {
            let column = Column::new(
                "rating",
                vec![CellValue::Float(4.5), CellValue::Empty, CellValue::Integer(3)],
            );
            let stats = column.numeric_stats().unwrap();
            assert_eq!(stats.min, 3.0);
            assert_eq!(stats.mean, 3.75);
            assert!(!stats.integral);
        }

        #[test]
        fn text_or_empty_columns_are_not_numeric() {
            let mixed = Column::new("x", vec![CellValue::Integer(1), CellValue::Text("a".into())]);
            assert!(mixed.numeric_stats().is_none());
            let blank = Column::new("y", vec![CellValue::Empty, CellValue::Empty]);
            assert!(blank.numeric_stats().is_none());
            let none = Column::new("z", vec![]);
            assert!(none.numeric_stats().is_none());
        }
    }

    mod dataset {
        use super::*;

        #[test]
        fn from_rows_pads_short_rows() {
            let ds = Dataset::from_rows(
                "menu.csv",
                vec!["product".into(), "price".into()],
                vec![vec!["Latte".into(), "45000".into()], vec!["Tea".into()]],
            )
            .unwrap();
            assert_eq!(ds.row_count(), 2);
            assert_eq!(ds.column_names(), vec!["product", "price"]);
            assert_eq!(ds.row(1).unwrap()[1], &CellValue::Empty);
            assert!(ds.row(2).is_none());
        }

        #[test]
        fn new_rejects_ragged_columns() {
            let result = Dataset::new(
                "bad.csv",
                vec![
                    Column::new("a", vec![CellValue::Integer(1)]),
                    Column::new("b", vec![]),
                ],
            );
            assert!(result.is_err());
        }

        #[test]
        fn new_rejects_blank_source() {
            assert!(Dataset::new(" ", vec![]).is_err());
        }
    }
}
