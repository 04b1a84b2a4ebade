use std::str::FromStr;

use quiz_core::model::{Difficulty, Language};
use services::{AcquisitionStatus, Presentation, SessionSnapshot};

use crate::views::{ViewError, ViewState};

/// What the session screen shows.
pub type SessionViewState = ViewState<Presentation>;

/// Map a published snapshot onto what the session view renders.
///
/// A snapshot only becomes `Ready` with an instance attached, so the round panel is
/// never mounted without content. Once the update stream has `closed` the last
/// snapshot is stale and the screen reports the session as gone.
#[must_use]
pub fn session_view_state(snapshot: &SessionSnapshot, closed: bool) -> SessionViewState {
    if closed {
        return ViewState::Error(ViewError::SessionClosed);
    }
    match &snapshot.status {
        AcquisitionStatus::Unavailable { reason } => {
            ViewState::Error(ViewError::ContentUnavailable {
                reason: reason.clone(),
            })
        }
        AcquisitionStatus::Ready => snapshot
            .presentation()
            .map_or(ViewState::Loading, ViewState::Ready),
        AcquisitionStatus::Idle | AcquisitionStatus::Loading => ViewState::Loading,
    }
}

#[must_use]
pub fn parse_language_choice(value: &str) -> Option<Language> {
    Language::from_str(value).ok()
}

#[must_use]
pub fn parse_difficulty_choice(value: &str) -> Option<Difficulty> {
    Difficulty::from_str(value).ok()
}
