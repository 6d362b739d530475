//! Logging bootstrap shared by the `smsgate` and `smsgate-ca` binaries.
//!
//! Logs always go to stderr: stdout is reserved for rendered command output
//! so that `--format json` results can be piped into other tools.

use tracing_subscriber::EnvFilter;

/// Install the global `tracing` subscriber.
///
/// `RUST_LOG` wins when set. Otherwise `verbose` selects `debug`, and the
/// binary-specific `default_level` applies.
pub fn init_tracing(default_level: &str, verbose: bool) {
    let level = if verbose { "debug" } else { default_level };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // A second init (e.g. from tests driving both binaries) is not an error.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
