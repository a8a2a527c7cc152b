//! File system change events.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// Kind of change reported for a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ChangeKind {
    /// A file or directory appeared.
    Created,
    /// A file or directory went away.
    Deleted,
    /// A file or directory moved from one path to another.
    Renamed,
}

impl ChangeKind {
    /// The change-type name as reported by the watcher.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "Created",
            Self::Deleted => "Deleted",
            Self::Renamed => "Renamed",
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A normalized filesystem change.
///
/// `new_path` is present exactly when the kind is [`ChangeKind::Renamed`];
/// the constructors are the only way to build one. Paths are never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeEvent {
    kind: ChangeKind,
    path: PathBuf,
    new_path: Option<PathBuf>,
}

impl ChangeEvent {
    /// A path was created.
    #[must_use]
    pub fn created(path: impl Into<PathBuf>) -> Self {
        Self::single(ChangeKind::Created, path.into())
    }

    /// A path was deleted.
    #[must_use]
    pub fn deleted(path: impl Into<PathBuf>) -> Self {
        Self::single(ChangeKind::Deleted, path.into())
    }

    /// A path was renamed from `from` to `to`.
    #[must_use]
    pub fn renamed(from: impl Into<PathBuf>, to: impl Into<PathBuf>) -> Self {
        let (path, new_path) = (from.into(), to.into());
        debug_assert!(!path.as_os_str().is_empty(), "rename source is empty");
        debug_assert!(!new_path.as_os_str().is_empty(), "rename target is empty");
        Self {
            kind: ChangeKind::Renamed,
            path,
            new_path: Some(new_path),
        }
    }

    fn single(kind: ChangeKind, path: PathBuf) -> Self {
        debug_assert!(!path.as_os_str().is_empty(), "{kind} event without a path");
        Self {
            kind,
            path,
            new_path: None,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> ChangeKind {
        self.kind
    }

    /// The affected path; the old path for a rename.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The destination of a rename.
    #[must_use]
    pub fn new_path(&self) -> Option<&Path> {
        self.new_path.as_deref()
    }
}

impl fmt::Display for ChangeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.new_path {
            Some(to) => write!(
                f,
                "{} {} -> {}",
                self.kind,
                self.path.display(),
                to.display()
            ),
            None => write!(f, "{} {}", self.kind, self.path.display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_path_only_for_rename() {
        let created = ChangeEvent::created("/a/file.txt");
        assert_eq!(created.kind(), ChangeKind::Created);
        assert_eq!(created.path(), Path::new("/a/file.txt"));
        assert!(created.new_path().is_none());

        let deleted = ChangeEvent::deleted("/a/file.txt");
        assert_eq!(deleted.kind(), ChangeKind::Deleted);
        assert!(deleted.new_path().is_none());

        let renamed = ChangeEvent::renamed("/a/old.txt", "/a/new.txt");
        assert_eq!(renamed.kind(), ChangeKind::Renamed);
        assert_eq!(renamed.path(), Path::new("/a/old.txt"));
        assert_eq!(renamed.new_path(), Some(Path::new("/a/new.txt")));
    }

    #[test]
    #[should_panic(expected = "without a path")]
    #[cfg(debug_assertions)]
    fn test_empty_path_rejected() {
        let _ = ChangeEvent::created("");
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(ChangeKind::Created.to_string(), "Created");
        assert_eq!(ChangeKind::Deleted.to_string(), "Deleted");
        assert_eq!(ChangeKind::Renamed.to_string(), "Renamed");
    }

    #[test]
    fn test_event_display() {
        assert_eq!(
            ChangeEvent::created("/a/b.txt").to_string(),
            "Created /a/b.txt"
        );
        assert_eq!(
            ChangeEvent::renamed("/a/old.txt", "/a/new.txt").to_string(),
            "Renamed /a/old.txt -> /a/new.txt"
        );
    }

    #[test]
    fn test_event_serializes() {
        let json = serde_json::to_string(&ChangeEvent::deleted("/a/b.txt")).unwrap();
        assert_eq!(
            json,
            r#"{"kind":"Deleted","path":"/a/b.txt","new_path":null}"#
        );
    }
}
