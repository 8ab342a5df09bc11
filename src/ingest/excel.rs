//! Excel-family import (xlsx, xlsm, xls, xlsb, ods)
//!
//! One-way conversion: the first worksheet is read into the dataset model,
//! first row as headers. Formulas arrive as their cached values.

use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Reader};

use crate::ingest::{placeholder_column_name, IngestError};
use crate::types::{CellValue, Dataset};

pub fn import(name: &str, bytes: &[u8]) -> Result<Dataset, IngestError> {
    let cursor = Cursor::new(bytes.to_vec());
    let mut workbook =
        open_workbook_auto_from_rs(cursor).map_err(|e| IngestError::Spreadsheet(e.to_string()))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| IngestError::Spreadsheet("Workbook has no sheets".to_string()))?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| IngestError::Spreadsheet(e.to_string()))?;

    let mut rows_iter = range.rows();

    let header = rows_iter.next().ok_or(IngestError::EmptyFile)?;
    let columns: Vec<String> = header
        .iter()
        .enumerate()
        .map(|(idx, cell)| match cell {
            Data::String(s) if !s.trim().is_empty() => s.trim().to_string(),
            Data::Empty => placeholder_column_name(idx),
            other => {
                let text = convert_cell(other).display();
                if text.is_empty() {
                    placeholder_column_name(idx)
                } else {
                    text
                }
            }
        })
        .collect();

    let mut rows = Vec::new();
    for row in rows_iter {
        if row.iter().all(|cell| matches!(cell, Data::Empty)) {
            continue;
        }
        rows.push(row.iter().map(convert_cell).collect());
    }

    if rows.is_empty() {
        return Err(IngestError::EmptyFile);
    }

    Ok(Dataset::new(name, columns, rows))
}

/// Map a calamine cell onto the dataset cell model
fn convert_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Null,
        Data::String(s) => {
            if s.trim().is_empty() {
                CellValue::Null
            } else {
                CellValue::Text(s.clone())
            }
        }
        Data::Float(n) => CellValue::Number(*n),
        Data::Int(n) => CellValue::Number(*n as f64),
        // Store booleans as TRUE/FALSE text, the way the cell displays
        Data::Bool(b) => CellValue::Text(if *b { "TRUE" } else { "FALSE" }.to_string()),
        // Serial date number; good enough for snapshots and stats
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        // Formula errors carry no usable value
        Data::Error(_) => CellValue::Null,
    }
}
