//! tracing subscriber setup.
//!
//! `logging.format = "json"` emits structured lines for deployment;
//! any other value falls back to a compact human-readable format for
//! local work. A `RUST_LOG` environment variable, when set, overrides
//! the configured level filter.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

pub fn init_logging(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let registry = tracing_subscriber::registry().with(filter);

    if config.format == "json" {
        registry
            .with(fmt::layer().json().with_target(true).with_current_span(true))
            .init();
    } else {
        registry.with(fmt::layer().compact().with_target(true)).init();
    }
}
