//! findex
//!
//! Keeps a file index in sync with changes under a set of watched
//! directories. Watchers publish normalized change events onto a queue and a
//! single indexer applies them to the `SQLite` index store.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod observability;
pub mod storage;
pub mod watcher;

pub use config::Config;
pub use error::{Error, Result};
