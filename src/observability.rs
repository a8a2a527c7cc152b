//! Structured logging and tracing configuration.
//!
//! Provides setup for observability using the `tracing` crate with:
//! - Structured logging with JSON output option
//! - Configurable log levels (`RUST_LOG` takes precedence)
//! - Spans for the long-lived watcher and indexer tasks

use tracing_subscriber::{
    filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt, Registry,
};

/// Initialize tracing.
///
/// # Panics
///
/// Panics if a tracing subscriber has already been initialized in this process.
pub fn init_tracing(level: &str, json: bool) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if json {
        let json_layer = fmt::layer()
            .json()
            .with_target(true)
            .with_thread_names(true)
            .with_current_span(true);

        Registry::default().with(env_filter).with(json_layer).init();
    } else {
        let fmt_layer = fmt::layer().with_target(true).with_thread_names(true);

        Registry::default().with(env_filter).with(fmt_layer).init();
    }

    tracing::debug!("Tracing initialized: level={}, json={}", level, json);
}

/// Spans for the service's long-running tasks.
pub mod spans {
    use std::path::Path;

    use tracing::{info_span, Span};

    /// Span covering one directory watcher.
    #[must_use]
    pub fn watcher_span(root: &Path) -> Span {
        info_span!("watcher", root = %root.display())
    }

    /// Span covering the indexer loop.
    #[must_use]
    pub fn indexer_span() -> Span {
        info_span!("indexer")
    }
}
