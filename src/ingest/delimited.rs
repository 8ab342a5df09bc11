//! Delimited text import (CSV/TSV)

use crate::ingest::{placeholder_column_name, IngestError};
use crate::types::{CellValue, Dataset};

/// Parse delimited text bytes into a dataset.
///
/// The first record is the header row; data rows are typed per field.
pub fn import(name: &str, bytes: &[u8]) -> Result<Dataset, IngestError> {
    let content = decode_utf8(bytes);
    let delimiter = sniff_delimiter(&content);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut records = reader.records();

    let header = match records.next() {
        Some(record) => record?,
        None => return Err(IngestError::EmptyFile),
    };

    let columns: Vec<String> = header
        .iter()
        .enumerate()
        .map(|(idx, field)| {
            let trimmed = field.trim();
            if trimmed.is_empty() {
                placeholder_column_name(idx)
            } else {
                trimmed.to_string()
            }
        })
        .collect();

    let mut rows = Vec::new();
    for record in records {
        let record = record?;
        // Skip fully blank lines rather than storing all-null rows
        if record.iter().all(|field| field.trim().is_empty()) {
            continue;
        }
        rows.push(record.iter().map(CellValue::from_field).collect());
    }

    if rows.is_empty() {
        return Err(IngestError::EmptyFile);
    }

    Ok(Dataset::new(name, columns, rows))
}

/// Decode bytes as UTF-8, falling back to Windows-1252 (common for
/// Excel-exported CSVs).
fn decode_utf8(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => {
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
            decoded.into_owned()
        }
    }
}

/// Detect the most likely field delimiter by checking consistency across the
/// first few lines.
///
/// For each candidate (tab, semicolon, comma, pipe), count fields per line.
/// The delimiter that produces the most consistent field count (>1 field)
/// wins.
fn sniff_delimiter(content: &str) -> u8 {
    let candidates: &[u8] = &[b'\t', b';', b',', b'|'];
    let sample_lines: Vec<&str> = content.lines().take(10).collect();

    if sample_lines.is_empty() {
        return b',';
    }

    let mut best = b',';
    let mut best_score = 0u64;

    for &delim in candidates {
        let counts: Vec<usize> = sample_lines
            .iter()
            .map(|line| {
                csv::ReaderBuilder::new()
                    .delimiter(delim)
                    .has_headers(false)
                    .flexible(true)
                    .from_reader(line.as_bytes())
                    .records()
                    .next()
                    .and_then(|r| r.ok())
                    .map(|r| r.len())
                    .unwrap_or(1)
            })
            .collect();

        // Must produce >1 field on the first line to be viable
        if counts.first().copied().unwrap_or(0) <= 1 {
            continue;
        }

        // Score: (number of lines with same field count as line 1) * field_count
        let target = counts[0];
        let consistent = counts.iter().filter(|&&c| c == target).count() as u64;
        let score = consistent * target as u64;

        if score > best_score {
            best_score = score;
            best = delim;
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_count_matches_input() {
        let ds = import("people.csv", b"name,age\nAlice,30\nBob,25\nCarol,40\n").unwrap();
        assert_eq!(ds.columns, vec!["name", "age"]);
        assert_eq!(ds.row_count(), 3);
        assert_eq!(ds.rows[0][0], CellValue::Text("Alice".into()));
        assert_eq!(ds.rows[2][1], CellValue::Number(40.0));
    }

    #[test]
    fn test_semicolon_sniffing() {
        let ds = import("eu.csv", b"name;score\nAlice;1,5\nBob;2,5\n").unwrap();
        assert_eq!(ds.columns, vec!["name", "score"]);
        assert_eq!(ds.row_count(), 2);
        // "1,5" is text under f64 parsing, not a number
        assert_eq!(ds.rows[0][1], CellValue::Text("1,5".into()));
    }

    #[test]
    fn test_tab_sniffing() {
        let ds = import("data.tsv", b"a\tb\tc\n1\t2\t3\n").unwrap();
        assert_eq!(ds.columns, vec!["a", "b", "c"]);
        assert_eq!(ds.rows[0][2], CellValue::Number(3.0));
    }

    #[test]
    fn test_blank_headers_get_placeholders() {
        let ds = import("raw.csv", b"name,,age\nAlice,x,30\n").unwrap();
        assert_eq!(ds.columns, vec!["name", "column_2", "age"]);
    }

    #[test]
    fn test_ragged_rows_are_normalized() {
        let ds = import("ragged.csv", b"a,b,c\n1,2\n1,2,3,4\n").unwrap();
        assert!(ds.rows.iter().all(|row| row.len() == 3));
        assert_eq!(ds.rows[0][2], CellValue::Null);
    }

    #[test]
    fn test_blank_lines_skipped() {
        let ds = import("gaps.csv", b"a,b\n1,2\n\n3,4\n").unwrap();
        assert_eq!(ds.row_count(), 2);
    }

    #[test]
    fn test_empty_input_is_an_error() {
        assert!(matches!(import("empty.csv", b""), Err(IngestError::EmptyFile)));
        assert!(matches!(
            import("header_only.csv", b"name,age\n"),
            Err(IngestError::EmptyFile)
        ));
    }

    #[test]
    fn test_windows_1252_fallback() {
        // "café" in Windows-1252: é = 0xE9, invalid as UTF-8
        let bytes = b"name\ncaf\xe9\n";
        let ds = import("latin.csv", bytes).unwrap();
        assert_eq!(ds.rows[0][0], CellValue::Text("café".into()));
    }
}
