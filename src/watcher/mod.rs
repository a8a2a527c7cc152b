//! File system watching and indexing.
//!
//! This module provides:
//! - Per-root directory watchers using notify-rs
//! - Rename pairing across split notifications
//! - Prefix-based exclusion of subtrees
//! - The change queue between watchers and the indexer
//! - The indexer loop that applies changes to the index store

mod events;
mod filter;
mod indexer;
mod pairing;
mod queue;
mod stats;
#[allow(clippy::module_inception)]
mod watcher;

pub use events::{ChangeEvent, ChangeKind};
pub use filter::ExclusionFilter;
pub use indexer::Indexer;
pub use queue::{change_queue, ChangeReceiver, ChangeSender};
pub use stats::{IndexerStats, IndexerStatsSnapshot, WatcherStats, WatcherStatsSnapshot};
pub use watcher::{spawn_watchers, DirectoryWatcher};
