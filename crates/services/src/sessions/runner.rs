use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use quiz_core::model::{Difficulty, GameInstance, Generation, Language, RoundReport};

use super::acquisition::acquire_instance;
use super::controller::{AcquisitionOutcome, AcquisitionRequest, SessionController};
use super::view::{AcquisitionStatus, SessionSnapshot};
use crate::config::{RetryPolicy, SessionConfig};
use crate::content::ContentSource;
use crate::error::{ContentError, SessionError};
use crate::random::RandomSource;

/// Inputs accepted by a running session.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    SetLanguage(Language),
    SetDifficulty(Difficulty),
    CompleteRound {
        generation: Generation,
        report: RoundReport,
    },
    Retry,
}

struct AcquisitionDone {
    request: AcquisitionRequest,
    attempt: u32,
    result: Result<GameInstance, ContentError>,
}

/// Aborts the task when dropped.
struct TaskGuard(JoinHandle<()>);

impl Drop for TaskGuard {
    fn drop(&mut self) {
        self.0.abort();
    }
}

//
// ─── HANDLE ────────────────────────────────────────────────────────────────────
//

/// Cheap, cloneable handle to a session running on its own task.
///
/// Commands and acquisition results are processed one at a time on that task, and a
/// snapshot is published after every transition. The task stops once the last
/// handle is dropped.
#[derive(Clone)]
pub struct SessionHandle {
    commands: mpsc::UnboundedSender<SessionCommand>,
    snapshots: watch::Receiver<SessionSnapshot>,
    _task: Arc<TaskGuard>,
}

impl SessionHandle {
    /// Start the session and its first acquisition cycle.
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn spawn(
        controller: SessionController,
        source: Arc<dyn ContentSource>,
        random: Arc<dyn RandomSource>,
        config: SessionConfig,
    ) -> Self {
        let (commands_tx, commands_rx) = mpsc::unbounded_channel();
        let (results_tx, results_rx) = mpsc::unbounded_channel();
        let (snapshots_tx, snapshots_rx) = watch::channel(controller.snapshot());

        let runner = SessionRunner {
            controller,
            source,
            random,
            retry: config.retry,
            commands: commands_rx,
            results_tx,
            results_rx,
            snapshots: snapshots_tx,
            in_flight: None,
        };
        let task = tokio::spawn(runner.run());

        Self {
            commands: commands_tx,
            snapshots: snapshots_rx,
            _task: Arc::new(TaskGuard(task)),
        }
    }

    fn send(&self, command: SessionCommand) -> Result<(), SessionError> {
        self.commands
            .send(command)
            .map_err(|_| SessionError::Closed)
    }

    /// # Errors
    ///
    /// Returns `SessionError::Closed` if the session task has stopped.
    pub fn set_language(&self, language: Language) -> Result<(), SessionError> {
        self.send(SessionCommand::SetLanguage(language))
    }

    /// # Errors
    ///
    /// Returns `SessionError::Closed` if the session task has stopped.
    pub fn set_difficulty(&self, difficulty: Difficulty) -> Result<(), SessionError> {
        self.send(SessionCommand::SetDifficulty(difficulty))
    }

    /// Report the end of the round presented under `generation`.
    ///
    /// Reports for any other round are dropped by the session.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Closed` if the session task has stopped.
    pub fn complete_round(
        &self,
        generation: Generation,
        report: RoundReport,
    ) -> Result<(), SessionError> {
        self.send(SessionCommand::CompleteRound { generation, report })
    }

    /// # Errors
    ///
    /// Returns `SessionError::Closed` if the session task has stopped.
    pub fn retry(&self) -> Result<(), SessionError> {
        self.send(SessionCommand::Retry)
    }

    /// Latest published state.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        self.snapshots.borrow().clone()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.snapshots.clone()
    }

    /// Wait until a published snapshot satisfies `predicate`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Closed` if the session stops first.
    pub async fn wait_for(
        &self,
        mut predicate: impl FnMut(&SessionSnapshot) -> bool,
    ) -> Result<SessionSnapshot, SessionError> {
        let mut updates = self.snapshots.clone();
        let snapshot = updates
            .wait_for(|snapshot| predicate(snapshot))
            .await
            .map_err(|_| SessionError::Closed)?;
        Ok(snapshot.clone())
    }
}

//
// ─── RUNNER ────────────────────────────────────────────────────────────────────
//

struct SessionRunner {
    controller: SessionController,
    source: Arc<dyn ContentSource>,
    random: Arc<dyn RandomSource>,
    retry: RetryPolicy,
    commands: mpsc::UnboundedReceiver<SessionCommand>,
    results_tx: mpsc::UnboundedSender<AcquisitionDone>,
    results_rx: mpsc::UnboundedReceiver<AcquisitionDone>,
    snapshots: watch::Sender<SessionSnapshot>,
    in_flight: Option<TaskGuard>,
}

impl SessionRunner {
    async fn run(mut self) {
        let request = self.controller.start_acquisition();
        info!(language = %request.language, "session started");
        self.begin(request);

        loop {
            // Commands first: a language change must bump the generation before a
            // result that was already queued for the old one is looked at.
            tokio::select! {
                biased;
                command = self.commands.recv() => match command {
                    Some(command) => self.handle_command(command),
                    None => break,
                },
                Some(done) = self.results_rx.recv() => self.handle_result(done),
            }
        }
        debug!("session runner stopped");
    }

    fn handle_command(&mut self, command: SessionCommand) {
        match command {
            SessionCommand::SetLanguage(language) => {
                if let Some(request) = self.controller.set_language(language) {
                    info!(language = %request.language, "language changed");
                    self.begin(request);
                }
            }
            SessionCommand::SetDifficulty(difficulty) => {
                if self.controller.set_difficulty(difficulty) {
                    debug!(%difficulty, "difficulty changed");
                    self.publish();
                }
            }
            SessionCommand::CompleteRound { generation, report } => {
                match self.controller.complete_round(generation, report) {
                    Ok(request) => {
                        info!(
                            qualified = report.qualified,
                            score = report.score,
                            round = self.controller.round(),
                            total = self.controller.accumulated_score(),
                            "round complete"
                        );
                        self.begin(request);
                    }
                    Err(err) => warn!(%err, "ignoring round report"),
                }
            }
            SessionCommand::Retry => {
                if let Some(request) = self.controller.retry() {
                    info!(language = %request.language, "retrying acquisition");
                    self.begin(request);
                }
            }
        }
    }

    fn begin(&mut self, request: AcquisitionRequest) {
        self.publish();
        self.spawn_acquisition(request, 0, None);
    }

    fn spawn_acquisition(
        &mut self,
        request: AcquisitionRequest,
        attempt: u32,
        delay: Option<Duration>,
    ) {
        let source = Arc::clone(&self.source);
        let random = Arc::clone(&self.random);
        let results = self.results_tx.clone();
        let task = tokio::spawn(async move {
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            let result =
                acquire_instance(source.as_ref(), random.as_ref(), &request.language).await;
            let _ = results.send(AcquisitionDone {
                request,
                attempt,
                result,
            });
        });
        // Only one cycle is ever current; whatever was still running is superseded.
        self.in_flight = Some(TaskGuard(task));
    }

    fn handle_result(&mut self, done: AcquisitionDone) {
        let AcquisitionDone {
            request,
            attempt,
            result,
        } = done;
        let generation = request.generation;
        if !self.controller.is_current(generation) {
            debug!(%generation, "discarding stale acquisition result");
            return;
        }
        self.in_flight = None;

        if let Err(err) = &result {
            if attempt < self.retry.max_retries {
                let retry = attempt + 1;
                let delay = self.retry.backoff_for(retry);
                warn!(%err, retry, ?delay, "acquisition failed, retrying");
                self.spawn_acquisition(request, retry, Some(delay));
                return;
            }
        }

        match self.controller.finish_acquisition(generation, result) {
            AcquisitionOutcome::Applied => {
                if let Some(instance) = self.controller.active_instance() {
                    info!(
                        language = %instance.language(),
                        index = instance.index().value(),
                        round = self.controller.round(),
                        "game instance ready"
                    );
                }
            }
            AcquisitionOutcome::Failed => {
                if let AcquisitionStatus::Unavailable { reason } = self.controller.status() {
                    warn!(%reason, "content unavailable");
                }
            }
            AcquisitionOutcome::Stale => {}
        }
        self.publish();
    }

    fn publish(&self) {
        self.snapshots.send_replace(self.controller.snapshot());
    }
}
