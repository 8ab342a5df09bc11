//! File ingestion
//!
//! Turns uploaded file bytes into an in-memory [`Dataset`]. Supports
//! delimited text (CSV/TSV) and Excel-family spreadsheets.

use thiserror::Error;

use crate::types::Dataset;

pub mod delimited;
pub mod excel;

/// Ingestion errors, all user-facing
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Unsupported file type: {0}. Upload a CSV, TSV, or Excel file.")]
    UnsupportedFormat(String),
    #[error("The file contains no data rows")]
    EmptyFile,
    #[error("Failed to parse delimited text: {0}")]
    Csv(#[from] csv::Error),
    #[error("Failed to read spreadsheet: {0}")]
    Spreadsheet(String),
}

/// Declared format of an uploaded file, derived from its name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// Delimited text: csv, tsv, txt
    Delimited,
    /// Excel-family container: xlsx, xlsm, xls, xlsb, ods
    Spreadsheet,
}

impl FileFormat {
    /// Detect the format from a file name's extension
    pub fn from_name(name: &str) -> Result<Self, IngestError> {
        let extension = name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "csv" | "tsv" | "txt" => Ok(FileFormat::Delimited),
            "xlsx" | "xlsm" | "xls" | "xlsb" | "ods" => Ok(FileFormat::Spreadsheet),
            _ => Err(IngestError::UnsupportedFormat(name.to_string())),
        }
    }
}

/// Parse uploaded bytes into a dataset.
///
/// The format is chosen from the file name; parse failures leave the caller's
/// current dataset untouched since nothing is written until this returns `Ok`.
pub fn load_dataset(name: &str, bytes: &[u8]) -> Result<Dataset, IngestError> {
    let format = FileFormat::from_name(name)?;
    let dataset = match format {
        FileFormat::Delimited => delimited::import(name, bytes)?,
        FileFormat::Spreadsheet => excel::import(name, bytes)?,
    };

    tracing::info!(
        "Loaded {}: {} rows x {} columns",
        name,
        dataset.row_count(),
        dataset.column_count()
    );
    Ok(dataset)
}

/// Placeholder name for blank header cells (the `column_3` in `column_N` is
/// the 1-based position)
pub(crate) fn placeholder_column_name(index: usize) -> String {
    format!("column_{}", index + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_detection() {
        assert_eq!(FileFormat::from_name("data.csv").unwrap(), FileFormat::Delimited);
        assert_eq!(FileFormat::from_name("Data.TSV").unwrap(), FileFormat::Delimited);
        assert_eq!(FileFormat::from_name("report.xlsx").unwrap(), FileFormat::Spreadsheet);
        assert_eq!(FileFormat::from_name("old.xls").unwrap(), FileFormat::Spreadsheet);
        assert!(FileFormat::from_name("notes.pdf").is_err());
        assert!(FileFormat::from_name("no_extension").is_err());
    }

    #[test]
    fn test_load_dataset_dispatches_by_name() {
        let ds = load_dataset("ages.csv", b"name,age\nAlice,30\n").unwrap();
        assert_eq!(ds.columns, vec!["name", "age"]);
        assert_eq!(ds.row_count(), 1);

        // Same bytes under a spreadsheet name must fail: not a zip container
        assert!(load_dataset("ages.xlsx", b"name,age\nAlice,30\n").is_err());
    }
}
