//! Logging helper
//!
//! Used by all binaries and demos to implement consistent logging

// Imports
use {
	anyhow::Context,
	std::env,
	tracing::{Subscriber, level_filters::LevelFilter},
	tracing_subscriber::prelude::*,
};

/// Initializes logging.
///
/// # Panics
/// Panics if a global logger was already set.
pub fn init() {
	self::registry().init();
}

/// Initializes logging, if no global logger was set yet
pub fn try_init() -> Result<(), anyhow::Error> {
	self::registry().try_init().context("Unable to set global logger")
}

/// Creates the registry with all layers
fn registry() -> impl Subscriber + Send + Sync + 'static {
	// Check if we should use colors
	let log_use_color = env::var("RUST_LOG_COLOR").map_or(true, |value| self::is_enabled(&value));

	let filter = tracing_subscriber::EnvFilter::builder()
		.with_default_directive(LevelFilter::INFO.into())
		.from_env_lossy();
	let layer = tracing_subscriber::fmt::layer()
		.with_ansi(log_use_color)
		.with_filter(filter);

	tracing_subscriber::registry().with(layer)
}

/// Parses an on/off environment variable
fn is_enabled(value: &str) -> bool {
	matches!(value.trim().to_uppercase().as_str(), "1" | "YES" | "TRUE")
}
