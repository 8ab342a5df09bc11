//! UI components for DataLM
//!
//! This module contains all user interface components built with Dioxus.

pub mod ask;
pub mod components;
pub mod table;
pub mod upload;

use crate::app::AppState;
use ask::AskPanel;
use dioxus::prelude::*;
use table::DataTable;
use upload::UploadPanel;

#[derive(Clone, Copy, PartialEq)]
enum Theme {
    Light,
    Dark,
}

impl Theme {
    fn toggle(&self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

/// Main Application Layout
#[component]
pub fn Layout() -> Element {
    let app_state = use_context::<AppState>();
    // Default to Dark theme
    let mut theme = use_signal(|| Theme::Dark);

    let has_dataset = app_state.dataset.read().is_some();
    let credential_error = app_state.credential.as_ref().err().map(|e| e.to_string());

    rsx! {
        // Theme wrapper
        div {
            "data-theme": "{theme().as_str()}",
            class: "app-shell flex flex-col h-screen w-screen bg-[var(--bg-main)] text-[var(--text-primary)] transition-colors duration-300 overflow-hidden font-sans",

            // Link CSS - In a real build step we might bundle this, but for dev this works
            link { rel: "stylesheet", href: "assets/styles.css" }

            // Header bar
            header {
                class: "flex items-center justify-between px-6 py-3 border-b border-[var(--border-subtle)] flex-shrink-0",

                div { class: "flex items-center gap-3",
                    div {
                        class: "w-9 h-9 rounded-xl flex items-center justify-center text-white shadow-md",
                        style: "background: linear-gradient(135deg, var(--accent-primary), var(--accent-hover));",
                        svg { width: "20", height: "20", view_box: "0 0 24 24", fill: "none", stroke: "currentColor", stroke_width: "2", stroke_linecap: "round", path { d: "M3 3v18h18M7 14l4-4 3 3 5-6" } }
                    }
                    div {
                        h1 { class: "text-lg font-bold tracking-tight", "DataLM" }
                        p { class: "text-xs text-[var(--text-tertiary)]", "Ask questions about your data" }
                    }
                }

                // Theme Toggle
                button {
                    onclick: move |_| theme.set(theme().toggle()),
                    class: "p-2 rounded-full hover:bg-[var(--bg-hover)] text-[var(--text-tertiary)] hover:text-[var(--text-primary)] transition-all active:scale-95",
                    title: "Toggle Theme",

                    if theme() == Theme::Dark {
                        // Sun icon
                        svg { width: "20", height: "20", view_box: "0 0 24 24", fill: "none", stroke: "currentColor", stroke_width: "2", stroke_linecap: "round", stroke_linejoin: "round", circle { cx: "12", cy: "12", r: "5" }, path { d: "M12 1v2M12 21v2M4.22 4.22l1.42 1.42M18.36 18.36l1.42 1.42M1 12h2M21 12h2M4.22 19.78l1.42-1.42M18.36 5.64l1.42-1.42" } }
                    } else {
                        // Moon icon
                        svg { width: "20", height: "20", view_box: "0 0 24 24", fill: "none", stroke: "currentColor", stroke_width: "2", stroke_linecap: "round", stroke_linejoin: "round", path { d: "M21 12.79A9 9 0 1 1 11.21 3 7 7 0 0 0 21 12.79z" } }
                    }
                }
            }

            // Main Content Area
            main {
                class: "flex-1 flex flex-col min-h-0 overflow-y-auto custom-scrollbar",

                div {
                    class: "w-full max-w-5xl mx-auto p-6 space-y-6",

                    // Credential warning: the app stays usable for browsing,
                    // but inference will not work until the key is set
                    if let Some(message) = credential_error {
                        div {
                            class: "banner banner-error flex items-start gap-3 p-4 rounded-xl border",
                            style: "background-color: var(--bg-error-subtle); border-color: var(--border-error); color: var(--text-error);",
                            svg { width: "18", height: "18", view_box: "0 0 24 24", fill: "none", stroke: "currentColor", stroke_width: "2", stroke_linecap: "round", path { d: "M12 9v4m0 4h.01M10.29 3.86L1.82 18a2 2 0 0 0 1.71 3h16.94a2 2 0 0 0 1.71-3L13.71 3.86a2 2 0 0 0-3.42 0z" } }
                            div {
                                div { class: "font-medium", "{message}" }
                                div { class: "text-xs mt-1 opacity-80", "Example: export GROQ_API_KEY=\"your-key\"" }
                            }
                        }
                    }

                    UploadPanel {}

                    if has_dataset {
                        DataTable {}
                        AskPanel {}
                    } else {
                        // Welcome hint before the first upload
                        div {
                            class: "flex flex-col items-center justify-center py-16 text-center animate-fade-in",
                            p { class: "text-lg text-[var(--text-secondary)]", "Upload a CSV or Excel file to begin." }
                            p { class: "text-sm text-[var(--text-tertiary)] mt-2", "Answers are generated by the Groq inference API." }
                        }
                    }
                }
            }
        }
    }
}
