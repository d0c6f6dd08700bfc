//! Logging utilities for the Quadra application.
//!
//! Every crate logs through `tracing`; this module owns the subscriber setup.

use tracing::{error, info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber at INFO level.
///
/// `RUST_LOG` still applies on top of the default directive, e.g.
/// `RUST_LOG=tower_http=debug`.
///
/// ```
/// use quadra_common::logging;
///
/// logging::init();
/// ```
pub fn init() {
    init_with_level(Level::INFO);
}

/// Initialize the tracing subscriber with a specific level for the `quadra_*` crates.
pub fn init_with_level(level: Level) {
    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = format!("quadra={}", level).parse() {
        filter = filter.add_directive(directive);
    }

    // try_init: a subscriber may already be installed (tests, embedding)
    let result = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_thread_ids(true),
        )
        .with(filter)
        .try_init();

    if result.is_ok() {
        info!("Logging initialized at level: {}", level);
    }
}

/// Log an error with context at the ERROR level.
pub fn log_error<E: std::fmt::Display>(error: E, context: &str) {
    error!("{}: {}", context, error);
}
