//! Diagnostic logging for the CLI.
//!
//! Library code emits `tracing` events: state transitions at `debug`,
//! silent fallbacks (unreadable preferences, missing images) at `warn`.
//! User-facing reports go through [`crate::output`], not the log.
//!
//! `RUST_LOG` overrides the default filter.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Install a compact stderr subscriber. Safe to call once per process.
pub fn init_cli_logger(verbose: bool) {
    let default = if verbose {
        "simple_folio=debug,info"
    } else {
        "simple_folio=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .try_init();
}
