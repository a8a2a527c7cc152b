//! Directory watcher using notify-rs.

use std::path::PathBuf;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Instant;

use notify::event::{ModifyKind, RenameMode};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tracing::Instrument;

use super::events::ChangeEvent;
use super::filter::ExclusionFilter;
use super::pairing::{RenamePairer, RENAME_GRACE};
use super::queue::ChangeSender;
use super::stats::WatcherStats;
use crate::error::WatcherError;
use crate::observability::spans;
use crate::Result;

/// Watches one root directory and its subdirectories.
pub struct DirectoryWatcher {
    root: PathBuf,
    filter: ExclusionFilter,
    sink: ChangeSender,
    stats: Arc<WatcherStats>,
    pairer: Arc<Mutex<RenamePairer>>,
}

impl DirectoryWatcher {
    /// Create a watcher for `root` that publishes into `sink`.
    #[must_use]
    pub fn new(
        root: impl Into<PathBuf>,
        filter: ExclusionFilter,
        sink: ChangeSender,
        stats: Arc<WatcherStats>,
    ) -> Self {
        Self {
            root: root.into(),
            filter,
            sink,
            stats,
            pairer: Arc::new(Mutex::new(RenamePairer::new())),
        }
    }

    /// Subscribe to change notifications for the root.
    ///
    /// Events flow into the sink for as long as the returned handle is alive.
    /// A rename half whose partner never arrives is held until
    /// [`flush_pending`](Self::flush_pending) resolves it, which
    /// [`run`](Self::run) does on a timer.
    ///
    /// # Errors
    ///
    /// Returns an error if the root is missing or the OS subscription fails.
    pub fn subscribe(&self) -> Result<RecommendedWatcher> {
        if !self.root.is_dir() {
            return Err(WatcherError::WatchFailed {
                path: self.root.display().to_string(),
                reason: "directory does not exist".to_string(),
            }
            .into());
        }

        let filter = self.filter.clone();
        let sink = self.sink.clone();
        let stats = Arc::clone(&self.stats);
        let pairer = Arc::clone(&self.pairer);

        let mut watcher = notify::recommended_watcher(
            move |result: std::result::Result<Event, notify::Error>| match result {
                Ok(event) => handle_event(event, &pairer, &filter, &sink, &stats),
                Err(e) => {
                    stats.watch_errors.fetch_add(1, Ordering::Relaxed);
                    tracing::error!("Watch error: {:?}", e);
                }
            },
        )
        .map_err(|e| WatcherError::WatchFailed {
            path: self.root.display().to_string(),
            reason: e.to_string(),
        })?;

        watcher
            .watch(&self.root, RecursiveMode::Recursive)
            .map_err(|e| WatcherError::WatchFailed {
                path: self.root.display().to_string(),
                reason: e.to_string(),
            })?;

        Ok(watcher)
    }

    /// Resolve a rename half that has waited out the grace period.
    ///
    /// A move out of the tree becomes `Deleted`.
    pub fn flush_pending(&self) {
        let mut pairer = self.pairer.lock();
        let expired = pairer.flush_expired(Instant::now());
        publish(expired, &self.filter, &self.sink, &self.stats);
    }

    /// Watch the root for the rest of the process lifetime.
    ///
    /// Never returns. While subscribed, held rename halves are flushed once
    /// per grace period. If the subscription cannot be set up the failure is
    /// logged and the task stays parked; nothing is retried.
    pub async fn run(self) {
        let span = spans::watcher_span(&self.root);

        async move {
            match self.subscribe() {
                Ok(_handle) => {
                    tracing::info!(path = %self.root.display(), "Watching directory");
                    let mut ticker = tokio::time::interval(RENAME_GRACE);
                    loop {
                        ticker.tick().await;
                        self.flush_pending();
                    }
                }
                Err(e) => {
                    self.stats.watch_errors.fetch_add(1, Ordering::Relaxed);
                    tracing::error!(
                        path = %self.root.display(),
                        error = %e,
                        "Directory watcher failed to start"
                    );
                    std::future::pending::<()>().await;
                }
            }
        }
        .instrument(span)
        .await;
    }
}

/// Spawn one watcher task per root, all feeding `sink`.
#[must_use]
pub fn spawn_watchers(
    roots: &[PathBuf],
    filter: &ExclusionFilter,
    sink: &ChangeSender,
    stats: &Arc<WatcherStats>,
) -> Vec<JoinHandle<()>> {
    roots
        .iter()
        .map(|root| {
            let watcher =
                DirectoryWatcher::new(root, filter.clone(), sink.clone(), Arc::clone(stats));
            tokio::spawn(watcher.run())
        })
        .collect()
}

/// Pair, filter and enqueue the changes carried by one notification.
///
/// The pairer stays locked while publishing so timer flushes cannot reorder
/// events.
fn handle_event(
    event: Event,
    pairer: &Mutex<RenamePairer>,
    filter: &ExclusionFilter,
    sink: &ChangeSender,
    stats: &WatcherStats,
) {
    let rename_half = RenamePairer::is_rename_half(&event);
    let mut pairer = pairer.lock();
    let changes = pairer.push(event, Instant::now());

    if changes.is_empty() && !rename_half {
        stats.events_ignored.fetch_add(1, Ordering::Relaxed);
        return;
    }

    publish(changes, filter, sink, stats);
}

fn publish(
    changes: Vec<ChangeEvent>,
    filter: &ExclusionFilter,
    sink: &ChangeSender,
    stats: &WatcherStats,
) {
    for change in changes {
        if filter.rejects(&change) {
            stats.events_excluded.fetch_add(1, Ordering::Relaxed);
            continue;
        }

        tracing::trace!(%change, "Change accepted");
        match sink.enqueue(change) {
            Ok(()) => {
                stats.events_accepted.fetch_add(1, Ordering::Relaxed);
            }
            Err(e) => {
                stats.watch_errors.fetch_add(1, Ordering::Relaxed);
                tracing::warn!(error = %e, "Dropping change");
            }
        }
    }
}

/// Map a raw notification onto change events.
///
/// Paired renames arrive as `Name(Both)` with `[from, to]`. Backends that
/// cannot pair renames report `Name(Any)`, which is resolved by whether the
/// path still exists. `From`/`To` halves are left to the rename pairer.
pub(crate) fn normalize(event: Event) -> Vec<ChangeEvent> {
    match event.kind {
        EventKind::Create(_) => event.paths.into_iter().map(ChangeEvent::created).collect(),
        EventKind::Remove(_) => event.paths.into_iter().map(ChangeEvent::deleted).collect(),
        EventKind::Modify(ModifyKind::Name(RenameMode::Both)) => {
            let mut paths = event.paths.into_iter();
            match (paths.next(), paths.next()) {
                (Some(from), Some(to)) => vec![ChangeEvent::renamed(from, to)],
                _ => Vec::new(),
            }
        }
        EventKind::Modify(ModifyKind::Name(RenameMode::Any)) => event
            .paths
            .into_iter()
            .map(|p| {
                if p.exists() {
                    ChangeEvent::created(p)
                } else {
                    ChangeEvent::deleted(p)
                }
            })
            .collect(),
        _ => Vec::new(),
    }
}
