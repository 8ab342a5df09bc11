//! Dataset types
//!
//! The in-memory table parsed from an uploaded file. A dataset lives only in
//! UI state: it is replaced on the next upload and never persisted.

use chrono::{DateTime, Local};

/// A single scalar cell value
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Free-form text
    Text(String),
    /// Numeric value (integers are stored as f64, like the source formats)
    Number(f64),
    /// Missing / empty cell
    Null,
}

impl CellValue {
    /// Parse a raw text field into a cell value.
    ///
    /// Empty fields become `Null`, fields that parse as a finite f64 become
    /// `Number`, everything else stays `Text`.
    pub fn from_field(field: &str) -> Self {
        let trimmed = field.trim();
        if trimmed.is_empty() {
            return CellValue::Null;
        }
        match trimmed.parse::<f64>() {
            Ok(n) if n.is_finite() => CellValue::Number(n),
            _ => CellValue::Text(field.to_string()),
        }
    }

    /// Numeric view of the cell, if it has one
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Render the cell for display and for prompt snapshots.
    ///
    /// Whole numbers are printed without a trailing `.0` so snapshots read
    /// like the original file.
    pub fn display(&self) -> String {
        match self {
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    format!("{}", n)
                }
            }
            CellValue::Null => String::new(),
        }
    }
}

/// An in-memory tabular dataset
///
/// Invariant: every row has exactly `columns.len()` cells. Ingestion pads or
/// truncates ragged rows to keep this true.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    /// Name of the source file (for display only)
    pub source_name: String,
    /// Ordered column names from the header row
    pub columns: Vec<String>,
    /// Row-major cell data, aligned with `columns`
    pub rows: Vec<Vec<CellValue>>,
    /// When the file was loaded
    pub loaded_at: DateTime<Local>,
}

impl Dataset {
    /// Create a dataset, normalizing every row to the header width
    pub fn new(source_name: impl Into<String>, columns: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.truncate(width);
                while row.len() < width {
                    row.push(CellValue::Null);
                }
                row
            })
            .collect();

        Self {
            source_name: source_name.into(),
            columns,
            rows,
            loaded_at: Local::now(),
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Indices of columns where every non-null cell is numeric (and at least
    /// one cell is). These feed the local statistics in prompts.
    pub fn numeric_columns(&self) -> Vec<usize> {
        (0..self.columns.len())
            .filter(|&col| {
                let mut saw_number = false;
                for row in &self.rows {
                    match &row[col] {
                        CellValue::Number(_) => saw_number = true,
                        CellValue::Null => {}
                        CellValue::Text(_) => return false,
                    }
                }
                saw_number
            })
            .collect()
    }

    /// Indices of columns that are not numeric
    pub fn text_columns(&self) -> Vec<usize> {
        let numeric = self.numeric_columns();
        (0..self.columns.len())
            .filter(|col| !numeric.contains(col))
            .collect()
    }

    /// Non-null numeric values of one column
    pub fn column_numbers(&self, col: usize) -> Vec<f64> {
        self.rows
            .iter()
            .filter_map(|row| row.get(col).and_then(CellValue::as_number))
            .collect()
    }
}
