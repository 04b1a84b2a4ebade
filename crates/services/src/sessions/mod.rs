mod acquisition;
mod controller;
mod runner;
mod view;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use acquisition::acquire_instance;
pub use controller::{AcquisitionOutcome, AcquisitionRequest, SessionController};
pub use runner::{SessionCommand, SessionHandle};
pub use view::{AcquisitionStatus, Presentation, SessionSnapshot};
