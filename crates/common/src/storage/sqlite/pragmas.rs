//! Per-connection pragmas

use rusqlite::Connection;

use super::config::SqlitePoolConfig;
use crate::storage::error::{StorageError, StorageResult};

/// Configure a freshly opened connection.
///
/// Runs once per physical connection, from the pool's init hook.
pub fn apply_connection_pragmas(conn: &Connection, config: &SqlitePoolConfig) -> StorageResult<()> {
    let pragma_error =
        |name: &str, e: rusqlite::Error| StorageError::Query(format!("PRAGMA {name} failed: {e}"));

    // journal_mode returns a row, so it goes through pragma_update_and_check
    let mode: String = conn
        .pragma_update_and_check(None, "journal_mode", config.journal_mode.as_pragma(), |row| {
            row.get(0)
        })
        .map_err(|e| pragma_error("journal_mode", e))?;
    tracing::trace!(journal_mode = %mode, "journal mode set");

    conn.pragma_update(None, "synchronous", "NORMAL")
        .map_err(|e| pragma_error("synchronous", e))?;
    conn.pragma_update(None, "foreign_keys", config.foreign_keys)
        .map_err(|e| pragma_error("foreign_keys", e))?;
    conn.busy_timeout(config.busy_timeout).map_err(|e| pragma_error("busy_timeout", e))?;

    Ok(())
}
