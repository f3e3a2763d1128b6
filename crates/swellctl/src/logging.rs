//! Tracing setup for swellctl.
//!
//! Filter comes from `SWELL_LOG` (e.g. `SWELL_LOG=swell_common=debug`).
//! Without it, `--verbose` selects `debug` and the default is `warn`.
//! Logs go to stderr so command output stays clean.

use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "SWELL_LOG";

pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "warn"
    }
}

pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    // A second init (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
