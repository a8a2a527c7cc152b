//! findex - file index service
//!
//! Entry point for the indexing daemon.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

use std::path::PathBuf;

use clap::Parser;
use findex::config::ConfigFile;
use findex::observability::init_tracing;
use findex::storage::{init_storage, Database};
use findex::watcher::{change_queue, spawn_watchers, ExclusionFilter, Indexer, WatcherStats};
use findex::{Config, Result};

/// findex - keeps a file index in sync with filesystem changes
#[derive(Parser, Debug)]
#[command(name = "findex")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON configuration file
    #[arg(short, long, env = "FINDEX_CONFIG")]
    config: Option<PathBuf>,

    /// Data directory for the `SQLite` index
    #[arg(short, long, env = "FINDEX_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Directories to watch
    #[arg(short, long, env = "FINDEX_WATCH_DIRS", value_delimiter = ',')]
    watch: Vec<PathBuf>,

    /// Path prefixes to exclude from indexing
    #[arg(short, long, env = "FINDEX_EXCLUDE", value_delimiter = ',')]
    exclude: Vec<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "FINDEX_LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Enable JSON logging output
    #[arg(long, env = "FINDEX_LOG_JSON")]
    log_json: bool,
}

impl Cli {
    fn into_config(self) -> Result<Config> {
        let mut config = Config {
            log_level: self.log_level,
            log_json: self.log_json,
            watch_dirs: self.watch,
            exclude_prefixes: self.exclude,
            ..Config::default()
        };

        if let Some(path) = &self.config {
            ConfigFile::load(path)?.apply_to(&mut config);
        }
        if let Some(dir) = self.data_dir {
            config.data_dir = dir;
        }

        config.resolve_paths(&std::env::current_dir()?);
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level, cli.log_json);

    tracing::info!("findex v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = cli.into_config()?;
    tracing::debug!(?config, "Configuration loaded");
    config.validate()?;

    for warning in config.exclusion_warnings() {
        tracing::warn!("{warning}");
    }
    if config.watch_dirs.is_empty() {
        tracing::warn!("No directories configured to watch");
    }

    let db = Database::open(config.database_path())?;
    init_storage(&db)?;
    tracing::info!(path = db.path(), "Index database ready");

    let (sink, queue) = change_queue();
    let watcher_stats = WatcherStats::new();
    let filter = ExclusionFilter::new(config.exclude_prefixes.iter().cloned());

    // `sink` stays alive until shutdown so the indexer keeps waiting even
    // with no watch directories configured.
    let watchers = spawn_watchers(&config.watch_dirs, &filter, &sink, &watcher_stats);

    let indexer = Indexer::new(db);
    let indexer_stats = indexer.stats();
    let mut indexer_task = tokio::spawn(indexer.run(queue));

    tracing::info!(watchers = watchers.len(), "findex running");

    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            result?;
            tracing::info!("Shutdown signal received");
        }
        result = &mut indexer_task => {
            if let Err(e) = result {
                tracing::error!(error = %e, "Indexer task ended unexpectedly");
            }
        }
    }

    for watcher in watchers {
        watcher.abort();
    }
    indexer_task.abort();

    tracing::info!(
        watcher = ?watcher_stats.snapshot(),
        indexer = ?indexer_stats.snapshot(),
        "findex stopped"
    );

    Ok(())
}
