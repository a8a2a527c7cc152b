//! Counters for watchers and the indexer.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Statistics shared by all directory watchers.
#[derive(Debug, Default)]
pub struct WatcherStats {
    pub events_accepted: AtomicU64,
    pub events_excluded: AtomicU64,
    pub events_ignored: AtomicU64,
    pub watch_errors: AtomicU64,
}

impl WatcherStats {
    /// Create new stats tracker.
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Get snapshot of current stats.
    #[must_use]
    pub fn snapshot(&self) -> WatcherStatsSnapshot {
        WatcherStatsSnapshot {
            events_accepted: self.events_accepted.load(Ordering::Relaxed),
            events_excluded: self.events_excluded.load(Ordering::Relaxed),
            events_ignored: self.events_ignored.load(Ordering::Relaxed),
            watch_errors: self.watch_errors.load(Ordering::Relaxed),
        }
    }
}

/// Snapshot of watcher stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatcherStatsSnapshot {
    pub events_accepted: u64,
    pub events_excluded: u64,
    pub events_ignored: u64,
    pub watch_errors: u64,
}

/// Statistics for the indexer loop.
#[derive(Debug, Default)]
pub struct IndexerStats {
    pub created: AtomicU64,
    pub renamed: AtomicU64,
    pub deleted: AtomicU64,
    pub no_match: AtomicU64,
    pub failed: AtomicU64,
}

impl IndexerStats {
    /// Create new stats tracker.
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Get snapshot of current stats.
    #[must_use]
    pub fn snapshot(&self) -> IndexerStatsSnapshot {
        IndexerStatsSnapshot {
            created: self.created.load(Ordering::Relaxed),
            renamed: self.renamed.load(Ordering::Relaxed),
            deleted: self.deleted.load(Ordering::Relaxed),
            no_match: self.no_match.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
        }
    }
}

/// Snapshot of indexer stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexerStatsSnapshot {
    pub created: u64,
    pub renamed: u64,
    pub deleted: u64,
    pub no_match: u64,
    pub failed: u64,
}

impl IndexerStatsSnapshot {
    /// Events the indexer has finished with, successfully or not.
    #[must_use]
    pub const fn processed(&self) -> u64 {
        self.created + self.renamed + self.deleted + self.failed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_watcher_stats_snapshot() {
        let stats = WatcherStats::new();
        assert_eq!(stats.snapshot().events_accepted, 0);

        stats.events_accepted.fetch_add(3, Ordering::Relaxed);
        stats.events_excluded.fetch_add(1, Ordering::Relaxed);

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.events_accepted, 3);
        assert_eq!(snapshot.events_excluded, 1);
        assert_eq!(snapshot.watch_errors, 0);
    }

    #[test]
    fn test_indexer_processed_total() {
        let stats = IndexerStats::new();
        stats.created.fetch_add(2, Ordering::Relaxed);
        stats.deleted.fetch_add(1, Ordering::Relaxed);
        stats.failed.fetch_add(1, Ordering::Relaxed);
        stats.no_match.fetch_add(1, Ordering::Relaxed);

        assert_eq!(stats.snapshot().processed(), 4);
    }
}
