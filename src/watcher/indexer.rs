//! Incremental indexing service.

use std::path::Path;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use tracing::Instrument;

use super::events::{ChangeEvent, ChangeKind};
use super::queue::ChangeReceiver;
use super::stats::IndexerStats;
use crate::error::WatcherError;
use crate::observability::spans;
use crate::storage::{IndexEntry, IndexStore, IndexUpdate};
use crate::Result;

/// Applies change events to the index store, one at a time.
pub struct Indexer<S> {
    store: S,
    stats: Arc<IndexerStats>,
}

impl<S: IndexStore> Indexer<S> {
    /// Create a new indexer.
    #[must_use]
    pub fn new(store: S) -> Self {
        Self::with_stats(store, IndexerStats::new())
    }

    /// Create an indexer that reports into existing stats.
    #[must_use]
    pub fn with_stats(store: S, stats: Arc<IndexerStats>) -> Self {
        Self { store, stats }
    }

    #[must_use]
    pub fn stats(&self) -> Arc<IndexerStats> {
        Arc::clone(&self.stats)
    }

    /// Apply a single event to the store.
    ///
    /// Creations are inserted with their key in original case and never
    /// overwrite an existing entry. Renames and deletions match the stored
    /// key case-insensitively. Returns the number of entries changed.
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the mutation.
    pub fn apply(&self, event: &ChangeEvent) -> Result<usize> {
        let path = path_key(event.path());

        match event.kind() {
            ChangeKind::Renamed => {
                let to = event.new_path().ok_or_else(|| {
                    WatcherError::Indexing(format!("rename of '{path}' has no destination"))
                })?;
                self.store
                    .update_indexes(&IndexUpdate::rename(&path, &path_key(to)))
            }
            ChangeKind::Created => self
                .store
                .set_indexes(&[IndexEntry::from_path(&path)], false),
            ChangeKind::Deleted => self.store.update_indexes(&IndexUpdate::remove(&path)),
        }
    }

    /// Apply an event, recording the outcome. Failures are logged and dropped.
    fn process(&self, event: &ChangeEvent) {
        tracing::debug!(kind = %event.kind(), path = %event.path().display(), "Processing change");

        match self.apply(event) {
            Ok(changed) => {
                let counter = match event.kind() {
                    ChangeKind::Created => &self.stats.created,
                    ChangeKind::Renamed => &self.stats.renamed,
                    ChangeKind::Deleted => &self.stats.deleted,
                };
                counter.fetch_add(1, Ordering::Relaxed);

                if changed == 0 {
                    self.stats.no_match.fetch_add(1, Ordering::Relaxed);
                    tracing::debug!(%event, "No index entry changed");
                }
            }
            Err(e) => {
                self.stats.failed.fetch_add(1, Ordering::Relaxed);
                tracing::error!(%event, error = %e, "Failed to apply change");
            }
        }

        let snapshot = self.stats.snapshot();
        tracing::debug!(
            created = snapshot.created,
            renamed = snapshot.renamed,
            deleted = snapshot.deleted,
            failed = snapshot.failed,
            "Indexer progress"
        );
    }

    /// Consume the queue until every producer is gone.
    ///
    /// Waits on the queue while it is empty, so an event is applied as soon
    /// as the task is scheduled after it arrives.
    pub async fn run(self, mut queue: ChangeReceiver) {
        async move {
            tracing::info!("Indexer started");

            while let Some(event) = queue.dequeue().await {
                self.process(&event);
            }

            tracing::info!("Change queue closed, indexer shutting down");
        }
        .instrument(spans::indexer_span())
        .await;
    }
}

fn path_key(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
