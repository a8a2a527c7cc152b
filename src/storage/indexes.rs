//! Index entry storage.

use rusqlite::{Connection, OptionalExtension};

use super::models::{fold_key, now_unix, split_path, IndexEntry, IndexUpdate};
use crate::error::StorageError;
use crate::Result;

const INSERT_ONLY: &str = "INSERT OR IGNORE INTO indexes \
     (name, extension, folder, search_key, search_key_folded, indexed_at) \
     VALUES (?, ?, ?, ?, ?, ?)";

const UPSERT: &str = "INSERT INTO indexes \
     (name, extension, folder, search_key, search_key_folded, indexed_at) \
     VALUES (?, ?, ?, ?, ?, ?) \
     ON CONFLICT(search_key_folded) DO UPDATE SET \
         name = excluded.name, \
         extension = excluded.extension, \
         folder = excluded.folder, \
         search_key = excluded.search_key, \
         indexed_at = excluded.indexed_at";

/// Insert entries.
///
/// With `upsert` false an entry whose folded key already exists is skipped;
/// with `upsert` true it overwrites the stored row. Returns rows written.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn insert_entries(conn: &Connection, entries: &[IndexEntry], upsert: bool) -> Result<usize> {
    let mut stmt = conn
        .prepare_cached(if upsert { UPSERT } else { INSERT_ONLY })
        .map_err(|e| StorageError::Database(e.to_string()))?;

    let now = now_unix();
    let mut written = 0;
    for entry in entries {
        written += stmt
            .execute(rusqlite::params![
                entry.name,
                entry.extension,
                entry.folder,
                entry.search_key,
                entry.folded_key(),
                now
            ])
            .map_err(|e| StorageError::Database(e.to_string()))?;
    }

    Ok(written)
}

/// Re-key or delete the entry whose folded key equals `update.match_key`.
///
/// A rename recomputes name, extension and folder from the new key and
/// replaces any entry already holding it. Returns rows affected; 0 means
/// nothing matched.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn update_entry_key(conn: &Connection, update: &IndexUpdate) -> Result<usize> {
    let match_key = fold_key(&update.match_key);

    let affected = match &update.new_key {
        None => conn.execute(
            "DELETE FROM indexes WHERE search_key_folded = ?",
            [&match_key],
        ),
        Some(new_key) => {
            let (name, extension, folder) = split_path(new_key);
            conn.execute(
                "UPDATE OR REPLACE indexes SET name = ?, extension = ?, folder = ?, \
                 search_key = ?, search_key_folded = ?, indexed_at = ? \
                 WHERE search_key_folded = ?",
                rusqlite::params![
                    name,
                    extension,
                    folder,
                    new_key,
                    fold_key(new_key),
                    now_unix(),
                    match_key
                ],
            )
        }
    }
    .map_err(|e| StorageError::Database(e.to_string()))?;

    Ok(affected)
}

/// Get the entry matching `key` case-insensitively.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn get_entry(conn: &Connection, key: &str) -> Result<Option<IndexEntry>> {
    conn.query_row(
        "SELECT name, extension, folder, search_key FROM indexes WHERE search_key_folded = ?",
        [fold_key(key)],
        |row| {
            Ok(IndexEntry {
                name: row.get(0)?,
                extension: row.get(1)?,
                folder: row.get(2)?,
                search_key: row.get(3)?,
            })
        },
    )
    .optional()
    .map_err(|e| StorageError::Database(e.to_string()).into())
}

/// List entries whose folder is exactly `folder`, ordered by name.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_entries_in_folder(conn: &Connection, folder: &str) -> Result<Vec<IndexEntry>> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT name, extension, folder, search_key FROM indexes \
             WHERE folder = ? ORDER BY name, extension",
        )
        .map_err(|e| StorageError::Database(e.to_string()))?;

    let entries = stmt
        .query_map([folder], |row| {
            Ok(IndexEntry {
                name: row.get(0)?,
                extension: row.get(1)?,
                folder: row.get(2)?,
                search_key: row.get(3)?,
            })
        })
        .map_err(|e| StorageError::Database(e.to_string()))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| StorageError::Database(e.to_string()))?;

    Ok(entries)
}

/// Count indexed entries.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_entries(conn: &Connection) -> Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM indexes", [], |row| row.get(0))
        .map_err(|e| StorageError::Database(e.to_string()).into())
}
