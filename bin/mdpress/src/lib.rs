//! mdpress CLI Library
//!
//! Command implementations for the mdpress CLI. The binary entry point only
//! parses arguments and dispatches here.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use mdpress::cmd;
//!
//! // Build a site with the settings from config.toml
//! cmd::build::run(Path::new("config.toml"), None, None).unwrap();
//! ```

pub mod cmd;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Crates whose level follows `-v`. Everything else stays at WARN.
const CRATES: [&str; 4] = ["mdpress", "mdpress_core", "mdpress_parser", "mdpress_generator"];

/// Filter directives for a verbosity level (0 = WARN, 1 = INFO, 2 = DEBUG, 3+ = TRACE).
pub fn filter_directives(verbose: u8) -> String {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    std::iter::once("warn".to_string())
        .chain(CRATES.iter().map(|krate| format!("{krate}={level}")))
        .collect::<Vec<_>>()
        .join(",")
}

/// Initialize tracing on stderr, leaving stdout to command output.
///
/// `RUST_LOG`, when set, replaces the `-v` directives.
pub fn init_tracing(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directives(verbose)));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}
