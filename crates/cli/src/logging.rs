//! `tracing` setup for the CLI. Logs go to stderr so stdout stays parseable.

use tracing_subscriber::EnvFilter;

/// `RUST_LOG` wins; otherwise each `-v` raises the level from `warn`.
pub fn init_logging(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
