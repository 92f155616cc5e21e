//! Tracing subscriber setup for the binary.

use tracing_subscriber::{fmt, EnvFilter};

/// Filter directive for `level`, scoped to this crate and its binary.
pub fn filter_directive(level: &str) -> String {
    format!("u_hyperheur={level},diverse_heuristics={level}")
}

/// Installs a compact stdout subscriber.
///
/// `RUST_LOG` takes precedence over `level` when set. Calling this more
/// than once is harmless: later calls leave the first subscriber in place.
pub fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(level)));

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .try_init();
}
