//! Log output on stderr.
//!
//! `RUST_LOG` wins when set. Otherwise the level follows `-v`:
//! none → warn, `-v` → info, `-vv` → debug, more → trace. Library crates log
//! through the `log` facade; tracing-subscriber picks those records up too.

use tracing_subscriber::EnvFilter;

/// Default filter directive for a verbosity count.
pub fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Installs the global subscriber. A second call is a no-op.
pub fn init_logging(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_for(verbosity)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
