//! Configuration management for findex.
//!
//! Supports configuration from:
//! - Command-line arguments (highest priority)
//! - Environment variables
//! - JSON configuration file (lowest priority)

mod file;
mod settings;

pub use file::ConfigFile;
pub use settings::Config;
