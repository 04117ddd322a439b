//! Diagnostic logging to stderr.

use tracing_subscriber::EnvFilter;

use crate::constants::LOG_ENV;

/// Install the global subscriber.
///
/// `LIBRIS_LOG` takes an `EnvFilter` directive; without it the level is
/// `warn`, or `info` with `--verbose`.
pub fn init_tracing(verbose: bool) {
    let fallback = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback));

    if let Err(err) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
    {
        eprintln!("warning: logging disabled: {}", err);
    }
}
