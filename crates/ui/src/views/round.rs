use dioxus::prelude::*;
use quiz_core::model::RoundReport;
use services::Presentation;

use crate::context::AppContext;
use crate::views::ScoreBoard;
use crate::vm::{give_up_report, payload_text, round_heading, solved_report, timeout_report};

fn report_once(mut reported: Signal<bool>, on_complete: Callback<RoundReport>, report: RoundReport) {
    if *reported.peek() {
        return;
    }
    reported.set(true);
    on_complete.call(report);
}

/// Plays one round. Mount it keyed by generation so every round gets a fresh deadline.
#[component]
pub fn RoundPanel(presentation: Presentation, on_complete: Callback<RoundReport>) -> Element {
    let ctx = use_context::<AppContext>();
    let clock = ctx.clock();
    let deadline = use_hook(|| clock.deadline_after(ctx.round_duration()));
    let reported = use_signal(|| false);

    let heading = round_heading(&presentation);
    let payload = payload_text(&presentation.instance);
    let difficulty = presentation.difficulty;
    let language = presentation.language.clone();
    let finished = reported();

    rsx! {
        section { class: "round-panel",
            header { class: "round-header",
                h2 { "{heading}" }
                span { class: "round-meta", "{language} · {difficulty}" }
            }
            ScoreBoard {
                deadline,
                score: presentation.accumulated_score,
                on_timeout: move |_| report_once(reported, on_complete, timeout_report()),
            }
            pre { class: "round-payload", "{payload}" }
            div { class: "round-actions",
                button {
                    id: "round-solved",
                    class: "btn btn-primary",
                    r#type: "button",
                    disabled: finished,
                    onclick: move |_| {
                        report_once(reported, on_complete, solved_report(clock.now(), deadline));
                    },
                    "Solved"
                }
                button {
                    id: "round-give-up",
                    class: "btn btn-secondary",
                    r#type: "button",
                    disabled: finished,
                    onclick: move |_| report_once(reported, on_complete, give_up_report()),
                    "Give up"
                }
            }
        }
    }
}
