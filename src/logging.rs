//! Logging setup using `tracing-subscriber`.

use tracing_subscriber::EnvFilter;

/// Initialise stderr logging for a one-shot run.
///
/// Controlled by `RUST_LOG` (default: `warn`), so a normal piped invocation
/// prints nothing of its own. Raise the filter to `debug` to trace the
/// config → stdin → login → post sequence.
pub fn init() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}
