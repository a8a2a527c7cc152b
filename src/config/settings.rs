//! Configuration settings and validation.

use crate::{Error, Result};
use std::path::{Path, PathBuf};

/// Main configuration for the indexing service.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory for the `SQLite` index database.
    pub data_dir: PathBuf,

    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit logs as JSON.
    pub log_json: bool,

    /// Root directories to watch.
    pub watch_dirs: Vec<PathBuf>,

    /// Path prefixes whose changes are never indexed.
    ///
    /// Matched as plain string prefixes, so `/a/b` also covers `/a/bc`.
    pub exclude_prefixes: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            log_level: "info".to_string(),
            log_json: false,
            watch_dirs: Vec::new(),
            exclude_prefixes: Vec::new(),
        }
    }
}

impl Config {
    /// Create a new configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration value is invalid.
    pub fn validate(&self) -> Result<()> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(Error::config(format!(
                "invalid log level '{}', must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            )));
        }

        if self.watch_dirs.iter().any(|d| d.as_os_str().is_empty()) {
            return Err(Error::config("watch directory cannot be empty"));
        }

        if self.exclude_prefixes.iter().any(String::is_empty) {
            return Err(Error::config(
                "exclude prefix cannot be empty (it would exclude every path)",
            ));
        }

        if self.data_dir.as_os_str().is_empty() {
            return Err(Error::config("data_dir cannot be empty"));
        }

        Ok(())
    }

    /// Warnings for exclusion prefixes that also match sibling paths.
    ///
    /// A prefix without a trailing separator excludes every path that merely
    /// starts with the same characters: `/srv/tmp` also drops `/srv/tmpfiles`.
    #[must_use]
    pub fn exclusion_warnings(&self) -> Vec<String> {
        self.exclude_prefixes
            .iter()
            .filter(|p| !p.ends_with(std::path::MAIN_SEPARATOR) && !p.ends_with('/'))
            .map(|p| {
                format!(
                    "exclude prefix '{p}' has no trailing separator and also matches \
                     sibling paths starting with '{p}'"
                )
            })
            .collect()
    }

    /// Make relative watch directories absolute against `base`.
    pub fn resolve_paths(&mut self, base: &Path) {
        for dir in &mut self.watch_dirs {
            if dir.is_relative() {
                *dir = base.join(&*dir);
            }
        }
    }

    /// Get the path to the `SQLite` database file.
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join("findex.db")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.log_level, "info");
        assert!(config.watch_dirs.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_new() {
        let config = Config::new();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_invalid_log_level() {
        let config = Config {
            log_level: "invalid".to_string(),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("log level"));
    }

    #[test]
    fn test_log_level_case_insensitive() {
        for level in ["TRACE", "Debug", "INFO", "Warn", "ERROR"] {
            let config = Config {
                log_level: level.to_string(),
                ..Default::default()
            };
            assert!(
                config.validate().is_ok(),
                "Level '{level}' should be valid (case insensitive)"
            );
        }
    }

    #[test]
    fn test_validate_empty_watch_dir() {
        let config = Config {
            watch_dirs: vec![PathBuf::new()],
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("watch directory"));
    }

    #[test]
    fn test_validate_empty_exclude_prefix() {
        let config = Config {
            exclude_prefixes: vec![String::new()],
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("exclude prefix"));
    }

    #[test]
    fn test_validate_empty_data_dir() {
        let config = Config {
            data_dir: PathBuf::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_exclusion_warnings() {
        let config = Config {
            exclude_prefixes: vec!["/srv/tmp".to_string(), "/srv/cache/".to_string()],
            ..Default::default()
        };
        let warnings = config.exclusion_warnings();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("'/srv/tmp'"));
    }

    #[test]
    fn test_resolve_paths() {
        let mut config = Config {
            watch_dirs: vec![PathBuf::from("docs"), PathBuf::from("/abs/dir")],
            ..Default::default()
        };
        config.resolve_paths(Path::new("/home/user"));
        assert_eq!(
            config.watch_dirs,
            vec![PathBuf::from("/home/user/docs"), PathBuf::from("/abs/dir")]
        );
    }

    #[test]
    fn test_database_path() {
        let config = Config {
            data_dir: PathBuf::from("/var/lib/findex"),
            ..Default::default()
        };
        assert_eq!(
            config.database_path(),
            PathBuf::from("/var/lib/findex/findex.db")
        );
    }
}
