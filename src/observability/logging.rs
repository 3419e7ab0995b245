//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber once at startup
//! - Honor `RUST_LOG` when set, otherwise the configured level

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter directives for the given level.
pub fn default_directives(level: &str) -> String {
    format!("urlshort={level},tower_http={level}")
}

/// Install the global subscriber.
///
/// Returns an error if a global subscriber has already been set.
pub fn init(level: &str) -> Result<(), tracing_subscriber::util::TryInitError> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_directives(level))),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init()
}
