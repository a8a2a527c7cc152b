//! JSON configuration file.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::Config;
use crate::Result;

/// On-disk configuration, all keys optional.
///
/// ```json
/// {
///   "watchedDirectories": ["/home/me/docs"],
///   "excludeDirectories": ["/home/me/docs/.cache/"],
///   "dataDir": "/var/lib/findex"
/// }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigFile {
    pub watched_directories: Vec<PathBuf>,
    pub exclude_directories: Vec<String>,
    pub data_dir: Option<PathBuf>,
}

impl ConfigFile {
    /// Read and parse a config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid JSON.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Self::parse(&raw)
    }

    /// Parse config file contents.
    ///
    /// # Errors
    ///
    /// Returns an error if the contents are not valid JSON.
    pub fn parse(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Fold file values into `config`. Non-empty values already in `config` win.
    pub fn apply_to(self, config: &mut Config) {
        if config.watch_dirs.is_empty() {
            config.watch_dirs = self.watched_directories;
        }
        if config.exclude_prefixes.is_empty() {
            config.exclude_prefixes = self.exclude_directories;
        }
        if let Some(dir) = self.data_dir {
            config.data_dir = dir;
        }
    }
}
