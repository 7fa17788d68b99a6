//! Logging setup on top of `tracing`.
//!
//! Log lines go to stderr so they never interleave with the banners and the
//! external tools' own stdout. `RUST_LOG` takes precedence over everything
//! else when set.

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub const LOG_LEVEL_ENV: &str = "CLASSIC_DOCS_LOG_LEVEL";

static INIT: Once = Once::new();

/// Parse a level name, case-insensitively. Unknown names yield `None`.
pub fn parse_level(level: &str) -> Option<Level> {
    match level.to_lowercase().as_str() {
        "trace" => Some(Level::TRACE),
        "debug" => Some(Level::DEBUG),
        "info" => Some(Level::INFO),
        "warn" => Some(Level::WARN),
        "error" => Some(Level::ERROR),
        _ => None,
    }
}

/// Pick the level: explicit flag, then `--verbose`, then the environment, then `warn`.
pub fn select_level(explicit: Option<&str>, verbose: bool, env_level: Option<&str>) -> Level {
    if let Some(level) = explicit.and_then(parse_level) {
        level
    } else if verbose {
        Level::DEBUG
    } else {
        env_level.and_then(parse_level).unwrap_or(Level::WARN)
    }
}

/// Install the global subscriber. Later calls are no-ops.
pub fn init(level: Level) {
    INIT.call_once(|| {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            EnvFilter::new(format!("classic_docs={}", level))
        };

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    });
}
