//! Prompt building
//!
//! Serializes a bounded snapshot of the dataset plus locally computed
//! statistics into the text prompt sent to the inference API. The snapshot is
//! capped so a large upload cannot blow past the API's input limits; the
//! shape line always states the true dataset size.

use crate::truncate_str;
use crate::types::Dataset;

/// Hard cap on columns rendered into a snapshot
pub const MAX_SNAPSHOT_COLS: usize = 50;

/// Default number of rows rendered into a snapshot
pub const DEFAULT_SNAPSHOT_ROWS: usize = 10;

/// Longest cell text embedded in a snapshot, in bytes
const MAX_CELL_BYTES: usize = 120;

/// How many numeric columns get statistics lines
const STATS_COLUMN_LIMIT: usize = 5;

/// Instruction used when the user asks a question
pub const QUESTION_INSTRUCTION: &str = "You are a helpful data analyst. Use ONLY the dataset provided below to answer the user's question.\nDo not hallucinate. If the question is ambiguous, explicitly state assumptions and compute using the data.";

/// Closing directive for question prompts
pub const ANSWER_STYLE: &str =
    "Provide a concise, step-by-step answer explaining any computations you did.";

/// Fixed instruction used when no question is supplied (the Summarize action)
pub const SUMMARY_INSTRUCTION: &str = "You are a data analyst. Summarize the dataset below in plain English.\nInclude: number of rows, number of columns, top 3 numeric columns by variance, any missing-data concerns,\nand 3 actionable insights the user should investigate. Use ONLY the provided data.";

/// Closing directive for summary prompts
pub const SUMMARY_STYLE: &str = "Produce a short human-friendly summary (3-6 paragraphs).";

/// A bounded textual rendering of a dataset
#[derive(Debug, Clone)]
pub struct DatasetSnapshot {
    /// The rendered snapshot text
    pub text: String,
    /// Rows actually rendered
    pub rows_shown: usize,
    /// Columns actually rendered
    pub cols_shown: usize,
}

impl DatasetSnapshot {
    /// Render shape, column classification, and the first `max_rows` rows as
    /// CSV.
    pub fn build(dataset: &Dataset, max_rows: usize) -> Self {
        let rows_shown = dataset.row_count().min(max_rows.max(1));
        let cols_shown = dataset.column_count().min(MAX_SNAPSHOT_COLS);

        let numeric_names: Vec<&str> = dataset
            .numeric_columns()
            .iter()
            .map(|&i| dataset.columns[i].as_str())
            .collect();
        let text_names: Vec<&str> = dataset
            .text_columns()
            .iter()
            .map(|&i| dataset.columns[i].as_str())
            .collect();

        let mut out = String::new();
        out.push_str(&format!(
            "Dataset shape: {} rows x {} columns\n",
            dataset.row_count(),
            dataset.column_count()
        ));
        out.push_str(&format!("Columns: {:?}\n", &dataset.columns));
        out.push_str(&format!("Numeric columns: {:?}\n", numeric_names));
        out.push_str(&format!("Categorical/text columns: {:?}\n", text_names));
        if cols_shown < dataset.column_count() {
            out.push_str(&format!(
                "(snapshot truncated to the first {} columns)\n",
                cols_shown
            ));
        }
        out.push('\n');

        out.push_str(&format!("First {} rows (CSV):\n", rows_shown));
        out.push_str(&render_csv(dataset, rows_shown, cols_shown));

        Self {
            text: out,
            rows_shown,
            cols_shown,
        }
    }
}

/// Render the header and the first rows as CSV, with proper quoting
fn render_csv(dataset: &Dataset, rows: usize, cols: usize) -> String {
    let mut writer = csv::WriterBuilder::new().from_writer(Vec::new());

    // Errors writing into a Vec cannot occur in practice; fall back to empty
    // output rather than propagating an impossible failure.
    let _ = writer.write_record(dataset.columns.iter().take(cols));
    for row in dataset.rows.iter().take(rows) {
        let _ = writer.write_record(
            row.iter()
                .take(cols)
                .map(|cell| truncate_str(&cell.display(), MAX_CELL_BYTES).to_string()),
        );
    }

    writer
        .into_inner()
        .ok()
        .and_then(|bytes| String::from_utf8(bytes).ok())
        .unwrap_or_default()
}

/// Per-column statistics for numeric columns, in a fixed text layout
///
/// Mirrors what a quick `describe()` would show: mean, median, sample std,
/// min, max, count. At most [`STATS_COLUMN_LIMIT`] columns are listed.
pub fn numeric_stats_text(dataset: &Dataset) -> String {
    let numeric = dataset.numeric_columns();
    if numeric.is_empty() {
        return "No numeric columns detected.".to_string();
    }

    let mut lines = Vec::new();
    for &col in numeric.iter().take(STATS_COLUMN_LIMIT) {
        let values = dataset.column_numbers(col);
        if values.is_empty() {
            continue;
        }
        let n = values.len();
        let mean = values.iter().sum::<f64>() / n as f64;
        let median = median_of(&values);
        let std = sample_std(&values, mean);
        let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

        lines.push(format!(
            "- {}: mean={:.3}, median={:.3}, std={:.3}, min={:.3}, max={:.3}, n={}",
            dataset.columns[col], mean, median, std, min, max, n
        ));
    }

    if numeric.len() > STATS_COLUMN_LIMIT {
        lines.push(format!(
            "...and {} more numeric columns.",
            numeric.len() - STATS_COLUMN_LIMIT
        ));
    }

    lines.join("\n")
}

fn median_of(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

fn sample_std(values: &[f64], mean: f64) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    variance.sqrt()
}

/// Build the full prompt for a request.
///
/// With a question, the question text is embedded verbatim; without one, the
/// fixed summarization instruction is used verbatim.
pub fn build_prompt(dataset: &Dataset, question: Option<&str>, snapshot_rows: usize) -> String {
    let snapshot = DatasetSnapshot::build(dataset, snapshot_rows);
    let stats = numeric_stats_text(dataset);

    let mut prompt = String::new();
    match question {
        Some(q) => {
            prompt.push_str(QUESTION_INSTRUCTION);
            push_data_sections(&mut prompt, &snapshot.text, &stats);
            prompt.push_str("USER QUESTION:\n");
            prompt.push_str(q);
            prompt.push_str("\n\n");
            prompt.push_str(ANSWER_STYLE);
        }
        None => {
            prompt.push_str(SUMMARY_INSTRUCTION);
            push_data_sections(&mut prompt, &snapshot.text, &stats);
            prompt.push_str(SUMMARY_STYLE);
        }
    }

    tracing::debug!("Built prompt ({} bytes)", prompt.len());
    prompt
}

fn push_data_sections(prompt: &mut String, snapshot: &str, stats: &str) {
    prompt.push_str("\n\nDATASET SNAPSHOT:\n");
    prompt.push_str(snapshot);
    prompt.push_str("\nLOCAL STATS:\n");
    prompt.push_str(stats);
    prompt.push_str("\n\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest;

    fn people() -> Dataset {
        ingest::load_dataset("people.csv", b"name,age\nAlice,30\nBob,25\nCarol,40\n").unwrap()
    }

    #[test]
    fn test_snapshot_contains_all_rows_under_cap() {
        let snapshot = DatasetSnapshot::build(&people(), DEFAULT_SNAPSHOT_ROWS);
        assert_eq!(snapshot.rows_shown, 3);
        assert!(snapshot.text.contains("Dataset shape: 3 rows x 2 columns"));
        assert!(snapshot.text.contains("Alice,30"));
        assert!(snapshot.text.contains("Bob,25"));
        assert!(snapshot.text.contains("Carol,40"));
    }

    #[test]
    fn test_snapshot_row_cap() {
        let mut csv_data = String::from("n\n");
        for i in 0..12 {
            csv_data.push_str(&format!("{}\n", i));
        }
        let ds = ingest::load_dataset("wide.csv", csv_data.as_bytes()).unwrap();
        let snapshot = DatasetSnapshot::build(&ds, 10);
        assert_eq!(snapshot.rows_shown, 10);
        assert!(snapshot.text.contains("First 10 rows (CSV):"));
        assert!(snapshot.text.contains("Dataset shape: 12 rows x 1 columns"));
        assert!(!snapshot.text.contains("\n11\n"));
    }

    #[test]
    fn test_snapshot_column_classification() {
        let snapshot = DatasetSnapshot::build(&people(), DEFAULT_SNAPSHOT_ROWS);
        assert!(snapshot.text.contains(r#"Numeric columns: ["age"]"#));
        assert!(snapshot.text.contains(r#"Categorical/text columns: ["name"]"#));
    }

    #[test]
    fn test_csv_quoting_of_awkward_cells() {
        let ds = ingest::load_dataset("tricky.csv", b"note,v\n\"a, b\",1\n").unwrap();
        let snapshot = DatasetSnapshot::build(&ds, 10);
        assert!(snapshot.text.contains("\"a, b\",1"));
    }

    #[test]
    fn test_stats_values() {
        let stats = numeric_stats_text(&people());
        assert!(stats.contains("- age: mean=31.667"));
        assert!(stats.contains("median=30.000"));
        assert!(stats.contains("min=25.000"));
        assert!(stats.contains("max=40.000"));
        assert!(stats.contains("n=3"));
    }

    #[test]
    fn test_stats_without_numeric_columns() {
        let ds = ingest::load_dataset("words.csv", b"a,b\nx,y\n").unwrap();
        assert_eq!(numeric_stats_text(&ds), "No numeric columns detected.");
    }

    #[test]
    fn test_stats_column_limit() {
        let ds = ingest::load_dataset(
            "many.csv",
            b"a,b,c,d,e,f,g\n1,2,3,4,5,6,7\n2,3,4,5,6,7,8\n",
        )
        .unwrap();
        let stats = numeric_stats_text(&ds);
        assert!(stats.contains("...and 2 more numeric columns."));
    }

    #[test]
    fn test_question_prompt_embeds_question_verbatim() {
        let prompt = build_prompt(&people(), Some("What is the average age?"), 10);
        assert!(prompt.contains(QUESTION_INSTRUCTION));
        assert!(prompt.contains("USER QUESTION:\nWhat is the average age?"));
        assert!(prompt.contains(ANSWER_STYLE));
        // All three rows' values reach the model
        assert!(prompt.contains("Alice,30"));
        assert!(prompt.contains("Bob,25"));
        assert!(prompt.contains("Carol,40"));
    }

    #[test]
    fn test_summary_prompt_uses_fixed_instruction() {
        let prompt = build_prompt(&people(), None, 10);
        assert!(prompt.contains(SUMMARY_INSTRUCTION));
        assert!(prompt.contains(SUMMARY_STYLE));
        assert!(!prompt.contains("USER QUESTION:"));
    }

    #[test]
    fn test_median_even_count() {
        assert_eq!(median_of(&[1.0, 2.0, 3.0, 4.0]), 2.5);
        assert_eq!(median_of(&[5.0]), 5.0);
    }
}
