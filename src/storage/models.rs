//! Data models for the file index.

use serde::Serialize;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

/// Get current Unix timestamp.
pub(crate) fn now_unix() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| i64::try_from(d.as_secs()).unwrap_or(0))
        .unwrap_or(0)
}

/// One indexed file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexEntry {
    /// File name without extension.
    pub name: String,

    /// Extension including the leading `.`, or empty.
    pub extension: String,

    /// Containing directory.
    pub folder: String,

    /// Full path used to match the entry on rename and delete.
    pub search_key: String,
}

impl IndexEntry {
    /// Build an entry from a full path, keeping its case.
    ///
    /// The extension starts at the last `.` of the file name, so
    /// `report.v2.txt` splits into `report.v2` and `.txt`. A file name that
    /// ends with `.` has no extension, and `.bashrc` is all extension.
    #[must_use]
    pub fn from_path(path: &str) -> Self {
        let (name, extension, folder) = split_path(path);
        Self {
            name,
            extension,
            folder,
            search_key: path.to_string(),
        }
    }

    /// Case-folded search key, the form stored for matching.
    #[must_use]
    pub fn folded_key(&self) -> String {
        fold_key(&self.search_key)
    }
}

/// A re-key or removal of the entry matching `match_key`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexUpdate {
    /// Lower-cased path of the entry to change.
    pub match_key: String,

    /// Lower-cased replacement path, or `None` to remove the entry.
    pub new_key: Option<String>,
}

impl IndexUpdate {
    /// Re-key the entry at `old` to `new`. Both keys are lower-cased.
    #[must_use]
    pub fn rename(old: &str, new: &str) -> Self {
        Self {
            match_key: fold_key(old),
            new_key: Some(fold_key(new)),
        }
    }

    /// Remove the entry at `path`. The key is lower-cased.
    #[must_use]
    pub fn remove(path: &str) -> Self {
        Self {
            match_key: fold_key(path),
            new_key: None,
        }
    }

    /// Whether this update deletes the matched entry.
    #[must_use]
    pub const fn is_removal(&self) -> bool {
        self.new_key.is_none()
    }
}

/// Lower-case a path for case-insensitive matching.
#[must_use]
pub fn fold_key(path: &str) -> String {
    path.to_lowercase()
}

/// Split a path into (name, extension, folder).
pub(crate) fn split_path(path: &str) -> (String, String, String) {
    let p = Path::new(path);
    let file_name = p
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let folder = p
        .parent()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_default();

    let (name, extension) = match file_name.rfind('.') {
        Some(dot) if dot + 1 == file_name.len() => (file_name[..dot].to_string(), String::new()),
        Some(dot) => (file_name[..dot].to_string(), file_name[dot..].to_string()),
        None => (file_name, String::new()),
    };

    (name, extension, folder)
}
