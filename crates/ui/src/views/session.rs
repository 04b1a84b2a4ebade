use dioxus::prelude::*;
use quiz_core::model::{Difficulty, RoundReport};
use tracing::warn;

use crate::context::AppContext;
use crate::views::{RoundPanel, ViewState};
use crate::vm::{parse_difficulty_choice, parse_language_choice, session_view_state};

#[component]
pub fn GameSessionView() -> Element {
    let ctx = use_context::<AppContext>();
    let handle = use_hook(|| ctx.spawn_session());
    let mut snapshot = use_signal(|| handle.snapshot());
    let mut closed = use_signal(|| false);

    {
        let handle = handle.clone();
        use_future(move || {
            let mut updates = handle.subscribe();
            async move {
                loop {
                    let latest = updates.borrow_and_update().clone();
                    snapshot.set(latest);
                    if updates.changed().await.is_err() {
                        break;
                    }
                }
                warn!("session task stopped publishing");
                closed.set(true);
            }
        });
    }

    let current = snapshot.read().clone();
    let state = session_view_state(&current, closed());
    let languages = ctx.languages().to_vec();
    let selected_language = current.language.to_string();
    let selected_difficulty = current.difficulty.as_str();

    let on_language = {
        let handle = handle.clone();
        move |evt: FormEvent| match parse_language_choice(&evt.value()) {
            Some(language) => {
                if let Err(err) = handle.set_language(language) {
                    warn!(%err, "language change dropped");
                }
            }
            None => warn!(value = %evt.value(), "ignoring invalid language choice"),
        }
    };
    let on_difficulty = {
        let handle = handle.clone();
        move |evt: FormEvent| {
            if let Some(difficulty) = parse_difficulty_choice(&evt.value()) {
                if let Err(err) = handle.set_difficulty(difficulty) {
                    warn!(%err, "difficulty change dropped");
                }
            }
        }
    };
    let on_retry = {
        let handle = handle.clone();
        move |_: MouseEvent| {
            if let Err(err) = handle.retry() {
                warn!(%err, "retry dropped");
            }
        }
    };

    rsx! {
        div { class: "page session-root", id: "session-root",
            header { class: "session-controls",
                label { class: "session-control",
                    span { "Language" }
                    select {
                        class: "session-select",
                        value: "{selected_language}",
                        onchange: on_language,
                        for language in languages {
                            option {
                                value: "{language}",
                                selected: language.as_str() == selected_language,
                                "{language}"
                            }
                        }
                    }
                }
                label { class: "session-control",
                    span { "Difficulty" }
                    select {
                        class: "session-select",
                        value: "{selected_difficulty}",
                        onchange: on_difficulty,
                        for difficulty in Difficulty::ALL {
                            option {
                                value: "{difficulty.as_str()}",
                                selected: difficulty.as_str() == selected_difficulty,
                                "{difficulty}"
                            }
                        }
                    }
                }
            }
            match state {
                ViewState::Loading => rsx! {
                    p { class: "session-status", "Loading..." }
                },
                ViewState::Error(err) => rsx! {
                    div { class: "session-error",
                        p { "{err.message()}" }
                        if let Some(detail) = err.detail() {
                            p { class: "session-error-detail", "{detail}" }
                        }
                        if err.is_retryable() {
                            button {
                                class: "btn btn-primary",
                                r#type: "button",
                                onclick: on_retry,
                                "Retry"
                            }
                        }
                    }
                },
                ViewState::Ready(presentation) => {
                    let generation = presentation.generation;
                    let handle = handle.clone();
                    rsx! {
                        RoundPanel {
                            key: "{generation}",
                            presentation,
                            on_complete: move |report: RoundReport| {
                                if let Err(err) = handle.complete_round(generation, report) {
                                    warn!(%err, "round report dropped");
                                }
                            },
                        }
                    }
                }
            }
        }
    }
}
