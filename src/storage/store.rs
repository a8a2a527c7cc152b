//! The storage boundary consumed by the indexer.

use super::connection::Database;
use super::indexes::{insert_entries, update_entry_key};
use super::models::{IndexEntry, IndexUpdate};
use crate::Result;

/// Persistence for index entries.
///
/// The indexer is the only caller, one mutation at a time, so
/// implementations need no ordering of their own.
pub trait IndexStore: Send + Sync {
    /// Persist new entries. With `upsert` false, entries whose key already
    /// exists (case-insensitively) are left untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the entries cannot be written.
    fn set_indexes(&self, entries: &[IndexEntry], upsert: bool) -> Result<usize>;

    /// Re-key or remove the entry matching `update.match_key`. Returns the
    /// number of entries changed; 0 when nothing matched.
    ///
    /// # Errors
    ///
    /// Returns an error if the update cannot be applied.
    fn update_indexes(&self, update: &IndexUpdate) -> Result<usize>;
}

impl IndexStore for Database {
    fn set_indexes(&self, entries: &[IndexEntry], upsert: bool) -> Result<usize> {
        self.with_transaction(|conn| insert_entries(conn, entries, upsert))
    }

    fn update_indexes(&self, update: &IndexUpdate) -> Result<usize> {
        self.with_transaction(|conn| update_entry_key(conn, update))
    }
}

impl<S: IndexStore + ?Sized> IndexStore for std::sync::Arc<S> {
    fn set_indexes(&self, entries: &[IndexEntry], upsert: bool) -> Result<usize> {
        (**self).set_indexes(entries, upsert)
    }

    fn update_indexes(&self, update: &IndexUpdate) -> Result<usize> {
        (**self).update_indexes(update)
    }
}
