use std::sync::Arc;

use chrono::Duration;
use quiz_core::model::{Difficulty, Language};
use services::{
    Clock, ContentSource, RandomSource, SessionConfig, SessionController, SessionHandle,
};

pub trait UiApp: Send + Sync {
    fn content_source(&self) -> Arc<dyn ContentSource>;
    fn random_source(&self) -> Arc<dyn RandomSource>;

    fn initial_language(&self) -> Language;
    fn initial_difficulty(&self) -> Difficulty;
    /// Languages offered in the picker.
    fn languages(&self) -> Vec<Language>;

    fn session_config(&self) -> SessionConfig;
    /// Time budget of a single round.
    fn round_duration(&self) -> Duration;
    fn clock(&self) -> Clock;
}

#[derive(Clone)]
pub struct AppContext {
    content_source: Arc<dyn ContentSource>,
    random_source: Arc<dyn RandomSource>,
    initial_language: Language,
    initial_difficulty: Difficulty,
    languages: Vec<Language>,
    session_config: SessionConfig,
    round_duration: Duration,
    clock: Clock,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        let initial_language = app.initial_language();
        let mut languages = app.languages();
        if !languages.contains(&initial_language) {
            languages.insert(0, initial_language.clone());
        }

        Self {
            content_source: app.content_source(),
            random_source: app.random_source(),
            initial_language,
            initial_difficulty: app.initial_difficulty(),
            languages,
            session_config: app.session_config(),
            round_duration: app.round_duration(),
            clock: app.clock(),
        }
    }

    #[must_use]
    pub fn initial_language(&self) -> &Language {
        &self.initial_language
    }

    #[must_use]
    pub fn initial_difficulty(&self) -> Difficulty {
        self.initial_difficulty
    }

    /// Picker entries; always contains the initial language.
    #[must_use]
    pub fn languages(&self) -> &[Language] {
        &self.languages
    }

    #[must_use]
    pub fn session_config(&self) -> SessionConfig {
        self.session_config
    }

    #[must_use]
    pub fn round_duration(&self) -> Duration {
        self.round_duration
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    /// Start a session with the configured sources. Needs a tokio runtime.
    #[must_use]
    pub fn spawn_session(&self) -> SessionHandle {
        SessionHandle::spawn(
            SessionController::new(self.initial_language.clone(), self.initial_difficulty),
            Arc::clone(&self.content_source),
            Arc::clone(&self.random_source),
            self.session_config,
        )
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
