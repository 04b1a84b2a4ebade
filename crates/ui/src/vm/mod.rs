mod round_vm;
mod session_vm;

pub use round_vm::{give_up_report, payload_text, round_heading, solved_report, timeout_report};
pub use session_vm::{
    SessionViewState, parse_difficulty_choice, parse_language_choice, session_view_state,
};
