mod round;
mod scoreboard;
mod session;
mod state;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use round::RoundPanel;
pub use scoreboard::ScoreBoard;
pub use session::GameSessionView;
pub use state::{ViewError, ViewState};
