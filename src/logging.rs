use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `campus_desk=debug`.
pub const LOG_ENV: &str = "CAMPUS_DESK_LOG";

fn default_directive() -> &'static str {
    if cfg!(debug_assertions) { "debug" } else { "warn" }
}

/// Install the stderr subscriber. Safe to call more than once.
pub fn init() {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_directive()));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_thread_names(true)
        .try_init();
}
