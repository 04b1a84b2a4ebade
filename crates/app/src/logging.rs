//! Logging setup for the `quiz` binary.
//!
//! Filter directives come from `QUIZ_LOG` (e.g. `QUIZ_LOG=services=debug,info`);
//! without it everything at `info` and above is printed to stderr.

use tracing_subscriber::{EnvFilter, fmt};

pub const LOG_ENV: &str = "QUIZ_LOG";
const DEFAULT_DIRECTIVE: &str = "info";

fn filter_from(raw: Option<&str>) -> EnvFilter {
    raw.and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVE))
}

/// Install the global subscriber. Later calls are no-ops.
pub fn init() {
    let raw = std::env::var(LOG_ENV).ok();
    let _ = fmt()
        .with_env_filter(filter_from(raw.as_deref()))
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
