//! Dataset table view

use dioxus::prelude::*;

use crate::app::AppState;

/// Rows rendered in the UI; the dataset itself is unbounded
const DISPLAY_ROWS: usize = 100;

#[component]
pub fn DataTable() -> Element {
    let app_state = use_context::<AppState>();
    let dataset = app_state.dataset.read();

    let Some(dataset) = dataset.as_ref() else {
        return rsx! {};
    };

    let total_rows = dataset.row_count();
    let shown_rows = total_rows.min(DISPLAY_ROWS);

    rsx! {
        div {
            class: "rounded-2xl border border-[var(--border-subtle)] bg-[var(--bg-surface)] overflow-hidden",

            div { class: "overflow-x-auto custom-scrollbar",
                table {
                    class: "data-table w-full text-sm",

                    thead {
                        tr {
                            class: "border-b border-[var(--border-subtle)]",
                            style: "background-color: var(--bg-subtle);",
                            for (idx, column) in dataset.columns.iter().enumerate() {
                                th {
                                    key: "{idx}",
                                    class: "px-4 py-2.5 text-left font-semibold whitespace-nowrap",
                                    "{column}"
                                }
                            }
                        }
                    }

                    tbody {
                        for (row_idx, row) in dataset.rows.iter().take(shown_rows).enumerate() {
                            tr {
                                key: "{row_idx}",
                                class: "border-b border-[var(--border-subtle)] hover:bg-[var(--bg-hover)] transition-colors",
                                for (col_idx, cell) in row.iter().enumerate() {
                                    td {
                                        key: "{col_idx}",
                                        class: "px-4 py-2 whitespace-nowrap",
                                        if cell.is_null() {
                                            span { class: "text-[var(--text-tertiary)] italic", "null" }
                                        } else {
                                            "{cell.display()}"
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }

            if total_rows > shown_rows {
                div {
                    class: "px-4 py-2 text-xs text-[var(--text-tertiary)]",
                    style: "background-color: var(--bg-subtle);",
                    "Showing the first {shown_rows} of {total_rows} rows"
                }
            }
        }
    }
}
