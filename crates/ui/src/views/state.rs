#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewError {
    ContentUnavailable { reason: String },
    SessionClosed,
}

impl ViewError {
    #[must_use]
    pub fn message(&self) -> &'static str {
        match self {
            ViewError::ContentUnavailable { .. } => "Content is unavailable right now.",
            ViewError::SessionClosed => "Something went wrong. Please restart the game.",
        }
    }

    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        match self {
            ViewError::ContentUnavailable { reason } => Some(reason),
            ViewError::SessionClosed => None,
        }
    }

    /// Whether a retry can recover from this error.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, ViewError::ContentUnavailable { .. })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Loading,
    Ready(T),
    Error(ViewError),
}
