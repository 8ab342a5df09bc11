//! Question & answer panel
//!
//! Triggers the prompt builder + inference client sequence and renders the
//! completion. One request at a time; the dataset and table stay untouched on
//! failure.

use dioxus::prelude::*;

use crate::app::{Answer, AnswerKind, AnswerState, AppState};
use crate::inference::{GroqClient, RequestParams};
use crate::prompt;
use crate::ui::components::Spinner;

/// Kick off one inference action. `question` of `None` means the fixed
/// summarize action.
///
/// Configuration problems (missing credential) surface immediately without a
/// network call.
fn start_request(app_state: &AppState, question: Option<String>) {
    let Some(dataset) = app_state.dataset.read().clone() else {
        return;
    };

    let mut answer = app_state.answer;

    let credential = match &app_state.credential {
        Ok(credential) => credential.clone(),
        Err(e) => {
            answer.set(AnswerState::Failed(e.to_string()));
            return;
        }
    };

    let settings = app_state.settings.read().clone();
    let client = match GroqClient::new(credential, settings.model.clone()) {
        Ok(client) => client,
        Err(e) => {
            answer.set(AnswerState::Failed(e.to_string()));
            return;
        }
    };

    let kind = match &question {
        Some(q) => AnswerKind::Question(q.clone()),
        None => AnswerKind::Summary,
    };
    answer.set(AnswerState::Pending(kind.clone()));

    spawn(async move {
        let prompt_text = prompt::build_prompt(&dataset, question.as_deref(), settings.snapshot_rows);
        let params = RequestParams {
            temperature: settings.temperature,
            max_tokens: settings.max_tokens,
        };

        match client.complete(&prompt_text, &params).await {
            Ok(content) => {
                answer.set(AnswerState::Ready(Answer {
                    kind,
                    content,
                    model: client.model().to_string(),
                }));
            }
            Err(e) => {
                tracing::warn!("Inference failed: {e}");
                answer.set(AnswerState::Failed(e.to_string()));
            }
        }
    });
}

#[component]
pub fn AskPanel() -> Element {
    let app_state = use_context::<AppState>();
    let mut question = use_signal(String::new);

    let answer_state = app_state.answer.read().clone();
    let is_pending = matches!(answer_state, AnswerState::Pending(_));

    let handle_ask = {
        let app_state = app_state.clone();
        move |_| {
            let q = question().trim().to_string();
            if q.is_empty() || is_pending {
                return;
            }
            start_request(&app_state, Some(q));
        }
    };

    let handle_keydown = {
        let app_state = app_state.clone();
        move |evt: KeyboardEvent| {
            if evt.key() == Key::Enter {
                evt.prevent_default();
                let q = question().trim().to_string();
                if !q.is_empty() && !is_pending {
                    start_request(&app_state, Some(q));
                }
            }
        }
    };

    let handle_summary = {
        let app_state = app_state.clone();
        move |_| {
            if !is_pending {
                start_request(&app_state, None);
            }
        }
    };

    rsx! {
        div {
            class: "p-5 rounded-2xl border border-[var(--border-subtle)] bg-[var(--bg-surface)] space-y-4",

            div {
                h2 { class: "font-semibold", "Ask about this data" }
                p { class: "text-xs text-[var(--text-tertiary)]", "e.g. Which manufacturer has the highest total sales?" }
            }

            // Question input + actions
            div {
                class: "flex items-center gap-3",

                input {
                    r#type: "text",
                    class: "flex-1 px-4 py-2.5 rounded-xl bg-[var(--bg-main)] border border-[var(--border-subtle)] outline-none text-[var(--text-primary)] placeholder-[var(--text-tertiary)] focus:border-[var(--border-focus)] transition-all",
                    placeholder: "Ask your question...",
                    value: "{question}",
                    oninput: move |evt| question.set(evt.value()),
                    onkeydown: handle_keydown,
                    disabled: is_pending,
                }

                button {
                    onclick: handle_ask,
                    disabled: is_pending || question().trim().is_empty(),
                    class: "px-4 py-2.5 rounded-xl bg-[var(--accent-primary)] text-[var(--accent-text)] hover:bg-[var(--accent-hover)] disabled:opacity-30 disabled:cursor-not-allowed transition-all shadow-md active:scale-95 text-sm font-medium",
                    "Ask"
                }

                button {
                    onclick: handle_summary,
                    disabled: is_pending,
                    class: "px-4 py-2.5 rounded-xl border border-[var(--border-subtle)] text-[var(--text-secondary)] hover:bg-[var(--bg-hover)] disabled:opacity-30 disabled:cursor-not-allowed transition-all text-sm font-medium",
                    "Generate Summary"
                }
            }

            // Result area
            match answer_state {
                AnswerState::Idle => rsx! {},
                AnswerState::Pending(kind) => rsx! {
                    div {
                        class: "flex items-center gap-3 text-sm text-[var(--text-tertiary)] animate-fade-in",
                        Spinner { size: 18 }
                        match kind {
                            AnswerKind::Summary => rsx! { span { "Generating summary..." } },
                            AnswerKind::Question(_) => rsx! { span { "Thinking..." } },
                        }
                    }
                },
                AnswerState::Ready(answer) => rsx! {
                    AnswerCard { answer }
                },
                AnswerState::Failed(message) => rsx! {
                    div {
                        class: "text-sm p-4 rounded-xl border",
                        style: "background-color: var(--bg-error-subtle); border-color: var(--border-error); color: var(--text-error);",
                        "{message}"
                    }
                },
            }
        }
    }
}

#[component]
fn AnswerCard(answer: Answer) -> Element {
    let heading = match &answer.kind {
        AnswerKind::Question(q) => rsx! {
            div {
                h3 { class: "font-semibold text-sm", "AI Answer" }
                p { class: "text-xs text-[var(--text-tertiary)] mt-0.5", "{q}" }
            }
        },
        AnswerKind::Summary => rsx! {
            h3 { class: "font-semibold text-sm", "Generated Summary" }
        },
    };

    rsx! {
        div {
            class: "rounded-xl border border-[var(--border-subtle)] bg-[var(--bg-main)] animate-fade-in",

            div {
                class: "flex items-start justify-between px-4 py-3 border-b border-[var(--border-subtle)]",
                {heading}
                span {
                    class: "text-[10px] font-mono px-2 py-1 rounded",
                    style: "background-color: var(--bg-hover); color: var(--text-secondary);",
                    "{answer.model}"
                }
            }

            div {
                class: "px-4 py-3 text-sm leading-relaxed whitespace-pre-wrap break-words",
                "{answer.content}"
            }
        }
    }
}
