//! File upload panel
//!
//! Reads the selected file through the Dioxus file engine and runs ingestion.
//! The dataset signal is only written on success, so a failed parse never
//! clobbers the table already on screen.

use dioxus::prelude::*;

use crate::app::{AnswerState, AppState};
use crate::ingest;

#[component]
pub fn UploadPanel() -> Element {
    let app_state = use_context::<AppState>();
    let mut upload_error = use_signal(|| None::<String>);

    let loaded = app_state
        .dataset
        .read()
        .as_ref()
        .map(|ds| {
            format!(
                "{} — {} rows x {} columns, loaded {}",
                ds.source_name,
                ds.row_count(),
                ds.column_count(),
                ds.loaded_at.format("%H:%M:%S")
            )
        });

    let handle_change = {
        let app_state = app_state.clone();
        move |evt: FormEvent| {
            let Some(file_engine) = evt.files() else {
                return;
            };
            let Some(name) = file_engine.files().into_iter().next() else {
                return;
            };

            let mut app_state = app_state.clone();
            let mut upload_error = upload_error.clone();

            spawn(async move {
                let Some(bytes) = file_engine.read_file(&name).await else {
                    upload_error.set(Some(format!("Failed to read {name}")));
                    return;
                };

                match ingest::load_dataset(&name, &bytes) {
                    Ok(dataset) => {
                        upload_error.set(None);
                        // A fresh dataset invalidates the previous answer
                        app_state.answer.set(AnswerState::Idle);
                        app_state.dataset.set(Some(dataset));
                    }
                    Err(e) => {
                        tracing::warn!("Ingestion failed for {name}: {e}");
                        upload_error.set(Some(e.to_string()));
                    }
                }
            });
        }
    };

    rsx! {
        div {
            class: "p-5 rounded-2xl border border-[var(--border-subtle)] bg-[var(--bg-surface)] space-y-3",

            div { class: "flex items-center justify-between",
                div {
                    h2 { class: "font-semibold", "Dataset" }
                    p { class: "text-xs text-[var(--text-tertiary)]", "CSV, TSV, or Excel" }
                }

                label {
                    class: "px-4 py-2 rounded-xl bg-[var(--accent-primary)] text-[var(--accent-text)] hover:bg-[var(--accent-hover)] cursor-pointer transition-all shadow-md active:scale-95 text-sm font-medium",
                    "Upload file"
                    input {
                        r#type: "file",
                        accept: ".csv,.tsv,.txt,.xlsx,.xlsm,.xls,.xlsb,.ods",
                        multiple: false,
                        class: "hidden",
                        style: "display: none;",
                        onchange: handle_change,
                    }
                }
            }

            if let Some(summary) = loaded {
                div {
                    class: "text-sm text-[var(--text-secondary)] flex items-center gap-2",
                    svg { width: "14", height: "14", view_box: "0 0 24 24", fill: "none", stroke: "currentColor", stroke_width: "2", stroke_linecap: "round", path { d: "M20 6L9 17l-5-5" } }
                    "{summary}"
                }
            }

            if let Some(message) = upload_error() {
                div {
                    class: "text-sm p-3 rounded-lg border",
                    style: "background-color: var(--bg-error-subtle); border-color: var(--border-error); color: var(--text-error);",
                    "{message}"
                }
            }
        }
    }
}
