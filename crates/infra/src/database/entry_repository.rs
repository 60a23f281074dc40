//! Entry repository implementation using SQLite
//!
//! Dates are stored as ISO `YYYY-MM-DD` text and status as its wire code,
//! so rows stay readable with the plain `sqlite3` shell.

use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use paytrack_common::storage::SqliteConnection;
use paytrack_core::EntryRepository as EntryRepositoryPort;
use paytrack_domain::{Entry, EntryStatus, NewEntry, Result as DomainResult};
use rusqlite::types::Type;
use rusqlite::{params, Row};
use tokio::task;
use tracing::{debug, info};

use super::manager::DbManager;
use crate::errors::{map_join_error, map_sql_error, map_storage_error};

const SELECT_COLUMNS: &str =
    "SELECT id, client, date, product, commission, forecast, status, created_at FROM entries";

const INSERT_SQL: &str = "INSERT INTO entries (client, date, product, commission, forecast, status)
     VALUES (?1, ?2, ?3, ?4, ?5, ?6)";

/// SQLite-backed implementation of `EntryRepository`
pub struct SqliteEntryRepository {
    db: Arc<DbManager>,
}

impl SqliteEntryRepository {
    /// Create a new repository instance
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl EntryRepositoryPort for SqliteEntryRepository {
    async fn list_all(&self) -> DomainResult<Vec<Entry>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<Vec<Entry>> {
            let conn = db.get_connection()?;
            conn.query_map(
                &format!("{SELECT_COLUMNS} ORDER BY date DESC, id DESC"),
                params![],
                map_entry_row,
            )
            .map_err(map_storage_error)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn list_by_month(&self, month: u32) -> DomainResult<Vec<Entry>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<Vec<Entry>> {
            let conn = db.get_connection()?;
            conn.query_map(
                &format!(
                    "{SELECT_COLUMNS} WHERE CAST(strftime('%m', date) AS INTEGER) = ?1
                     ORDER BY date DESC, id DESC"
                ),
                params![month],
                map_entry_row,
            )
            .map_err(map_storage_error)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn get_by_id(&self, id: i64) -> DomainResult<Option<Entry>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<Option<Entry>> {
            let conn = db.get_connection()?;
            find_entry(&conn, id)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn create(&self, entry: NewEntry) -> DomainResult<Entry> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<Entry> {
            let conn = db.get_connection()?;
            conn.execute(
                INSERT_SQL,
                params![
                    entry.client,
                    entry.date,
                    entry.product,
                    entry.commission,
                    entry.forecast,
                    entry.status.as_str()
                ],
            )
            .map_err(map_storage_error)?;

            let id = conn.last_insert_rowid();
            debug!(entry_id = id, "entry inserted");
            fetch_entry(&conn, id)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn create_batch(&self, entries: Vec<NewEntry>) -> DomainResult<usize> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<usize> {
            let mut conn = db.get_connection()?;
            let tx = conn.transaction().map_err(map_storage_error)?;
            {
                let mut stmt = tx.prepare_cached(INSERT_SQL).map_err(map_sql_error)?;
                for entry in &entries {
                    stmt.execute(params![
                        entry.client,
                        entry.date,
                        entry.product,
                        entry.commission,
                        entry.forecast,
                        entry.status.as_str()
                    ])
                    .map_err(map_sql_error)?;
                }
            }
            tx.commit().map_err(map_sql_error)?;

            info!(count = entries.len(), "entry batch inserted");
            Ok(entries.len())
        })
        .await
        .map_err(map_join_error)?
    }

    async fn update(&self, id: i64, entry: NewEntry) -> DomainResult<Option<Entry>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<Option<Entry>> {
            let conn = db.get_connection()?;
            let changed = conn
                .execute(
                    "UPDATE entries
                     SET client = ?1, date = ?2, product = ?3, commission = ?4,
                         forecast = ?5, status = ?6
                     WHERE id = ?7",
                    params![
                        entry.client,
                        entry.date,
                        entry.product,
                        entry.commission,
                        entry.forecast,
                        entry.status.as_str(),
                        id
                    ],
                )
                .map_err(map_storage_error)?;

            if changed == 0 {
                return Ok(None);
            }
            find_entry(&conn, id)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn delete(&self, id: i64) -> DomainResult<usize> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<usize> {
            let conn = db.get_connection()?;
            let deleted = conn
                .execute("DELETE FROM entries WHERE id = ?1", params![id])
                .map_err(map_storage_error)?;
            debug!(entry_id = id, deleted, "entry delete executed");
            Ok(deleted)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn list_pending_due_by(&self, horizon: NaiveDate) -> DomainResult<Vec<Entry>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<Vec<Entry>> {
            let conn = db.get_connection()?;
            conn.query_map(
                &format!(
                    "{SELECT_COLUMNS} WHERE status = ?1 AND forecast <= ?2
                     ORDER BY forecast ASC, id ASC"
                ),
                params![EntryStatus::Pending.as_str(), horizon],
                map_entry_row,
            )
            .map_err(map_storage_error)
        })
        .await
        .map_err(map_join_error)?
    }
}

// =============================================================================
// Row Helpers
// =============================================================================

fn find_entry(conn: &SqliteConnection, id: i64) -> DomainResult<Option<Entry>> {
    match conn.query_row(&format!("{SELECT_COLUMNS} WHERE id = ?1"), params![id], map_entry_row) {
        Ok(entry) => Ok(Some(entry)),
        Err(err) if err.is_no_rows() => Ok(None),
        Err(err) => Err(map_storage_error(err)),
    }
}

fn fetch_entry(conn: &SqliteConnection, id: i64) -> DomainResult<Entry> {
    conn.query_row(&format!("{SELECT_COLUMNS} WHERE id = ?1"), params![id], map_entry_row)
        .map_err(map_storage_error)
}

fn map_entry_row(row: &Row<'_>) -> rusqlite::Result<Entry> {
    let status: String = row.get(6)?;
    let status = EntryStatus::from_str(&status)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(6, Type::Text, Box::new(e)))?;

    Ok(Entry {
        id: row.get(0)?,
        client: row.get(1)?,
        date: row.get(2)?,
        product: row.get(3)?,
        commission: row.get(4)?,
        forecast: row.get(5)?,
        status,
        created_at: row.get(7)?,
    })
}
