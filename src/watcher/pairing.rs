//! Rename pairing across notify's split rename notifications.
//!
//! inotify reports a move inside a watched tree as `Name(From)`, `Name(To)`
//! and finally `Name(Both)`, all carrying the same tracker. A move across the
//! root boundary only produces the half that lies inside the tree: `From`
//! for a move out, `To` for a move in. Halves that never pair up are turned
//! into `Deleted` and `Created`.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use notify::event::{ModifyKind, RenameMode};
use notify::{Event, EventKind};

use super::events::ChangeEvent;
use super::watcher::normalize;

/// How long a rename half waits for its partner before it is resolved alone.
pub(crate) const RENAME_GRACE: Duration = Duration::from_millis(200);

#[derive(Debug)]
enum Pending {
    /// Source half seen; the destination may still follow.
    From {
        path: PathBuf,
        tracker: Option<usize>,
        since: Instant,
    },
    /// Both halves seen; the backend may still send a combined event.
    Paired {
        from: PathBuf,
        to: PathBuf,
        tracker: Option<usize>,
        since: Instant,
    },
}

impl Pending {
    const fn since(&self) -> Instant {
        match self {
            Self::From { since, .. } | Self::Paired { since, .. } => *since,
        }
    }

    const fn tracker(&self) -> Option<usize> {
        match self {
            Self::From { tracker, .. } | Self::Paired { tracker, .. } => *tracker,
        }
    }

    fn resolve(self) -> ChangeEvent {
        match self {
            Self::From { path, .. } => ChangeEvent::deleted(path),
            Self::Paired { from, to, .. } => ChangeEvent::renamed(from, to),
        }
    }
}

/// Turns raw notifications into change events, pairing rename halves.
///
/// Events come out in the order their notifications arrived. At most one
/// rename is held back at a time; any unrelated notification resolves it first.
#[derive(Debug, Default)]
pub(crate) struct RenamePairer {
    pending: Option<Pending>,
}

impl RenamePairer {
    pub(crate) const fn new() -> Self {
        Self { pending: None }
    }

    /// Whether `event` is a rename half this pairer may hold back.
    pub(crate) fn is_rename_half(event: &Event) -> bool {
        matches!(
            event.kind,
            EventKind::Modify(ModifyKind::Name(RenameMode::From | RenameMode::To))
        )
    }

    /// Feed one notification received at `now`.
    pub(crate) fn push(&mut self, event: Event, now: Instant) -> Vec<ChangeEvent> {
        let tracker = event.tracker();
        let mut out = Vec::new();

        match event.kind {
            EventKind::Modify(ModifyKind::Name(RenameMode::From)) => {
                out.extend(self.pending.take().map(Pending::resolve));
                let mut paths = event.paths.into_iter();
                if let Some(path) = paths.next() {
                    self.pending = Some(Pending::From {
                        path,
                        tracker,
                        since: now,
                    });
                }
                out.extend(paths.map(ChangeEvent::deleted));
            }
            EventKind::Modify(ModifyKind::Name(RenameMode::To)) => {
                let mut paths = event.paths.into_iter();
                let Some(to) = paths.next() else {
                    return out;
                };
                match self.pending.take() {
                    Some(Pending::From {
                        path: from,
                        tracker: from_tracker,
                        ..
                    }) if from_tracker == tracker => {
                        self.pending = Some(Pending::Paired {
                            from,
                            to,
                            tracker,
                            since: now,
                        });
                    }
                    other => {
                        out.extend(other.map(Pending::resolve));
                        out.push(ChangeEvent::created(to));
                    }
                }
                out.extend(paths.map(ChangeEvent::created));
            }
            EventKind::Modify(ModifyKind::Name(RenameMode::Both)) => {
                match self.pending.take() {
                    Some(pending) if pending.tracker() == tracker => {}
                    other => out.extend(other.map(Pending::resolve)),
                }
                out.extend(normalize(event));
            }
            _ => {
                out.extend(self.pending.take().map(Pending::resolve));
                out.extend(normalize(event));
            }
        }

        out
    }

    /// Resolve a held-back half that has waited at least [`RENAME_GRACE`].
    pub(crate) fn flush_expired(&mut self, now: Instant) -> Vec<ChangeEvent> {
        let expired = self
            .pending
            .as_ref()
            .is_some_and(|p| now.saturating_duration_since(p.since()) >= RENAME_GRACE);

        if expired {
            self.pending.take().map(Pending::resolve).into_iter().collect()
        } else {
            Vec::new()
        }
    }
}
