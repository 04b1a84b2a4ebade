#![forbid(unsafe_code)]

pub mod config;
pub mod content;
pub mod countdown;
pub mod error;
pub mod random;
pub mod sessions;

pub use quiz_core::Clock;

pub use config::{CountdownConfig, RetryPolicy, SessionConfig};
pub use content::{
    ContentSource, DirectoryContentSource, HttpContentConfig, HttpContentSource,
    InMemoryContentSource,
};
pub use countdown::{CountdownHandle, TimedOut, run_countdown, spawn_countdown};
pub use error::{ContentError, SessionError};
pub use random::{RandomSource, SeededRandom, ThreadRandom, select_instance};
pub use sessions::{
    AcquisitionStatus, Presentation, SessionCommand, SessionController, SessionHandle,
    SessionSnapshot,
};
