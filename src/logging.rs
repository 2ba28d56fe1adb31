//! Diagnostics setup for the binaries.
//!
//! Results go to stderr as `!log <key> <value>` lines, the format the tester
//! scripts collect. Everything else is `tracing` output, filtered by `RUST_LOG`
//! and also written to stderr so that stdout only carries the answer.

use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. Defaults to `warn` when `RUST_LOG` is unset.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    // A second call (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
