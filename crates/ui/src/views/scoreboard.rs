use chrono::{DateTime, Utc};
use dioxus::prelude::*;
use quiz_core::countdown::{CountdownTimer, score_line};
use services::run_countdown;

use crate::context::AppContext;

/// Remaining time and score of the running round.
///
/// The countdown starts when the board mounts and stops when it unmounts.
#[component]
pub fn ScoreBoard(deadline: DateTime<Utc>, score: u64, on_timeout: Callback<()>) -> Element {
    let ctx = use_context::<AppContext>();
    let clock = ctx.clock();
    let countdown = ctx.session_config().countdown;
    let mut display = use_signal(|| CountdownTimer::new(deadline).display(clock.now()));

    use_future(move || async move {
        let timer = CountdownTimer::new(deadline).with_mode(countdown.mode);
        run_countdown(timer, clock, countdown.tick, move |tick| {
            if *display.peek() != tick.display {
                display.set(tick.display);
            }
            if tick.timed_out {
                on_timeout.call(());
            }
        })
        .await;
    });

    let line = score_line(&display.read(), score);

    rsx! {
        div { class: "scoreboard", id: "scoreboard", "{line}" }
    }
}
