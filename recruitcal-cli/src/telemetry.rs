//! Structured logging setup.

use tracing_subscriber::EnvFilter;

/// Install an env-filtered fmt subscriber on stderr unless one is already set.
/// Defaults to warnings only so log lines don't interleave with prompts.
pub fn init_tracing() {
    if tracing::dispatcher::has_been_set() {
        return;
    }
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
