//! Periodic driver for [`CountdownTimer`].
//!
//! [`run_countdown`] is the tick loop itself; it runs until the future is dropped,
//! which ties the schedule to whoever owns it. [`spawn_countdown`] puts the same
//! loop on a tokio task and exposes the display and timeouts as channels.

use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::info;

use quiz_core::Clock;
use quiz_core::countdown::{CountdownTick, CountdownTimer};

use crate::config::CountdownConfig;

const MIN_TICK: Duration = Duration::from_millis(1);

/// Tick `timer` every `tick` and hand each result to `on_tick`.
///
/// The first tick fires immediately. Never returns; drop the future to stop it.
pub async fn run_countdown<F>(mut timer: CountdownTimer, clock: Clock, tick: Duration, mut on_tick: F)
where
    F: FnMut(CountdownTick),
{
    let mut interval = tokio::time::interval(tick.max(MIN_TICK));
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        interval.tick().await;
        on_tick(timer.tick(clock.now()));
    }
}

/// Timeout signal emitted by a spawned countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimedOut {
    pub deadline: DateTime<Utc>,
    pub at: DateTime<Utc>,
}

/// A countdown running on its own task. Dropping the handle stops the task.
pub struct CountdownHandle {
    display: watch::Receiver<String>,
    timeouts: mpsc::UnboundedReceiver<TimedOut>,
    task: JoinHandle<()>,
}

impl CountdownHandle {
    /// Latest rendered remaining time.
    #[must_use]
    pub fn display(&self) -> String {
        self.display.borrow().clone()
    }

    #[must_use]
    pub fn display_updates(&self) -> watch::Receiver<String> {
        self.display.clone()
    }

    /// Wait for the next timeout signal. Returns `None` once the countdown stopped.
    pub async fn next_timeout(&mut self) -> Option<TimedOut> {
        self.timeouts.recv().await
    }

    /// Next timeout signal that has already been emitted, if any.
    pub fn try_next_timeout(&mut self) -> Option<TimedOut> {
        self.timeouts.try_recv().ok()
    }

    /// Stop ticking.
    pub fn stop(self) {
        self.task.abort();
    }
}

impl Drop for CountdownHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Start a countdown towards `deadline` on a tokio task.
///
/// Must be called from within a tokio runtime.
#[must_use]
pub fn spawn_countdown(
    deadline: DateTime<Utc>,
    clock: Clock,
    config: CountdownConfig,
) -> CountdownHandle {
    let timer = CountdownTimer::new(deadline).with_mode(config.mode);
    let (display_tx, display_rx) = watch::channel(timer.display(clock.now()));
    let (timeouts_tx, timeouts_rx) = mpsc::unbounded_channel();

    let task = tokio::spawn(run_countdown(timer, clock, config.tick, move |tick| {
        display_tx.send_replace(tick.display);
        if tick.timed_out {
            let at = clock.now();
            info!(%deadline, %at, "countdown timed out");
            let _ = timeouts_tx.send(TimedOut { deadline, at });
        }
    }));

    CountdownHandle {
        display: display_rx,
        timeouts: timeouts_rx,
        task,
    }
}
