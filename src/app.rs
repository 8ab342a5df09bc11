//! Root Dioxus application component
//!
//! This module contains the main App component that serves as the root of the
//! UI tree, plus the shared application state.

use crate::inference::{self, Credential, CredentialError};
use crate::storage::settings::{load_settings, AppSettings};
use crate::types::Dataset;
use crate::ui::Layout;
use dioxus::prelude::*;

/// What the user asked for in the current inference action
#[derive(Clone, PartialEq, Debug)]
pub enum AnswerKind {
    /// Free-text question, kept for display above the answer
    Question(String),
    /// The fixed summarize action
    Summary,
}

/// A rendered completion
#[derive(Clone, PartialEq, Debug)]
pub struct Answer {
    pub kind: AnswerKind,
    pub content: String,
    /// Model that produced the completion
    pub model: String,
}

/// State of the current inference action
#[derive(Clone, PartialEq, Debug)]
pub enum AnswerState {
    /// No request yet (or dataset replaced)
    Idle,
    /// A request is in flight
    Pending(AnswerKind),
    /// Completion received
    Ready(Answer),
    /// Request failed; message is user-facing
    Failed(String),
}

/// Global application state shared across components
#[derive(Clone)]
pub struct AppState {
    pub dataset: Signal<Option<Dataset>>,
    pub settings: Signal<AppSettings>,
    pub answer: Signal<AnswerState>,
    /// Read once from the environment at startup; `Err` keeps the app usable
    /// for browsing data, but inference actions surface the error
    pub credential: Result<Credential, CredentialError>,
}

impl AppState {
    pub fn new() -> Self {
        let credential = inference::credential().cloned();
        if let Err(ref e) = credential {
            tracing::warn!("Inference is not configured: {e}");
        }

        tracing::info!("AppState initialized");
        Self {
            dataset: Signal::new(None),
            settings: Signal::new(load_settings()),
            answer: Signal::new(AnswerState::Idle),
            credential,
        }
    }
}

#[component]
pub fn App() -> Element {
    let app_state = AppState::new();
    use_context_provider(|| app_state);

    rsx! {
        Layout {}
    }
}
