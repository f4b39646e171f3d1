//! Logging setup for the `loom` binary.
//!
//! Library crates only emit `tracing` events; this module installs the one
//! subscriber, writing to stderr so stdout stays reserved for reports.
//!
//! # Log Levels
//!
//! - `info`: scenario selection, effects applied
//! - `debug`: every mapper applied
//! - `trace`: per-project fan-out tasks

use std::io;

use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const CRATES: [&str; 6] = [
    "loom",
    "loom_core",
    "loom_graph",
    "loom_loader",
    "loom_manifest",
    "loom_mappers",
];

/// Map a `-v` count to a level: info, then debug, then trace.
pub fn level_from_verbosity(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Install the global subscriber. Call once at startup.
pub fn init(verbosity: u8) {
    let layer = fmt::layer()
        .compact()
        .with_writer(io::stderr)
        .with_target(false)
        .without_time();

    tracing_subscriber::registry()
        .with(env_filter(level_from_verbosity(verbosity)))
        .with(layer)
        .init();
}

/// `RUST_LOG` wins; otherwise our crates log at `level` and others at warn.
fn env_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives(level)))
}

fn directives(level: Level) -> String {
    let level = level.as_str().to_lowercase();
    let mut directives = vec!["warn".to_string()];
    directives.extend(CRATES.iter().map(|krate| format!("{krate}={level}")));
    directives.join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(level_from_verbosity(0), Level::INFO);
        assert_eq!(level_from_verbosity(1), Level::DEBUG);
        assert_eq!(level_from_verbosity(5), Level::TRACE);
    }

    #[test]
    fn test_directives_scope_our_crates() {
        assert_eq!(
            directives(Level::DEBUG),
            "warn,loom=debug,loom_core=debug,loom_graph=debug,loom_loader=debug,\
             loom_manifest=debug,loom_mappers=debug"
        );
    }
}
