//! `SQLite` storage for the file index.
//!
//! This module provides:
//! - Connection management and migrations
//! - Index entry queries
//! - The [`IndexStore`] boundary used by the indexer

mod connection;
mod indexes;
mod models;
mod schema;
mod store;

pub use connection::Database;
pub use indexes::{
    count_entries, get_entry, insert_entries, list_entries_in_folder, update_entry_key,
};
pub use models::{fold_key, IndexEntry, IndexUpdate};
pub use schema::{migrate, verify_schema, SCHEMA_VERSION};
pub use store::IndexStore;

/// Initialize storage with migrations.
///
/// # Errors
///
/// Returns an error if database initialization fails.
pub fn init_storage(db: &Database) -> crate::Result<()> {
    db.with_conn(|conn| {
        migrate(conn)?;
        verify_schema(conn)?;

        tracing::info!("Storage initialized, schema version {SCHEMA_VERSION}");
        Ok(())
    })
}
