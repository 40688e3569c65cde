//! Logging
//!
//! Installs the `tracing` subscriber used by the application.

use tracing::Level;

/// Parse a level name, falling back to INFO
pub fn parse_level(level: &str) -> Level {
    level.parse::<Level>().unwrap_or(Level::INFO)
}

/// Install a fmt subscriber at the given level.
///
/// Returns false when a global subscriber is already installed.
pub fn init_logging(level: &str) -> bool {
    tracing_subscriber::fmt()
        .with_max_level(parse_level(level))
        .with_target(true)
        .try_init()
        .is_ok()
}
