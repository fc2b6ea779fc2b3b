//! Log output setup

use tracing_subscriber::EnvFilter;

/// Environment variable holding a filter directive that overrides the flags
pub const LOG_ENV: &str = "ICDSYNC_LOG";

/// Level used when `ICDSYNC_LOG` is unset; quiet wins over verbose
pub fn default_level(quiet: bool, verbose: bool) -> &'static str {
    match (quiet, verbose) {
        (true, _) => "error",
        (false, true) => "debug",
        (false, false) => "info",
    }
}

/// Install the global subscriber, writing plain lines to stderr
///
/// Calling this more than once is harmless; later calls are ignored.
pub fn init(quiet: bool, verbose: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level(quiet, verbose)));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(atty::is(atty::Stream::Stderr))
        .with_target(false)
        .without_time()
        .try_init();
}
