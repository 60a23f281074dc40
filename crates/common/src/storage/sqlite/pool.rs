//! r2d2 pool of SQLite connections

use std::path::Path;
use std::time::Instant;

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use tracing::{debug, info, instrument, warn};

use super::config::SqlitePoolConfig;
use super::connection::SqliteConnection;
use super::pragmas::apply_connection_pragmas;
use crate::storage::error::{StorageError, StorageResult};

/// Point-in-time view of the pool, reported by the health endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolHealth {
    pub healthy: bool,
    pub connections: u32,
    pub idle_connections: u32,
    pub max_connections: u32,
    pub message: Option<String>,
}

/// Pool of connections to one SQLite file.
///
/// Connections are configured by [`apply_connection_pragmas`] when opened.
#[derive(Debug)]
pub struct SqlitePool {
    pool: Pool<SqliteConnectionManager>,
    config: SqlitePoolConfig,
}

impl SqlitePool {
    /// Open a pool on `path`.
    ///
    /// One connection is checked out before returning, so an unreadable or
    /// non-database file fails here rather than on the first request.
    #[instrument(skip(path, config), fields(db_path = ?path, pool_size = config.max_size))]
    pub fn new(path: &Path, config: SqlitePoolConfig) -> StorageResult<Self> {
        if config.max_size == 0 {
            return Err(StorageError::InvalidConfig("pool size must be at least 1".into()));
        }

        let init_config = config.clone();
        let manager = SqliteConnectionManager::file(path).with_init(move |conn| {
            apply_connection_pragmas(conn, &init_config)
                .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
        });

        let pool = Pool::builder()
            .max_size(config.max_size)
            .connection_timeout(config.acquire_timeout)
            .build(manager)
            .map_err(|e| StorageError::Connection(format!("cannot open pool: {e}")))?;

        pool.get()
            .map_err(|e| StorageError::Connection(format!("cannot open database: {e}")))?
            .query_row("SELECT 1", [], |row| row.get::<_, i64>(0))?;

        info!(max_size = config.max_size, "sqlite pool ready");
        Ok(Self { pool, config })
    }

    pub fn max_size(&self) -> u32 {
        self.config.max_size
    }

    /// Check out a connection, waiting up to the configured acquire timeout.
    pub fn get_connection(&self) -> StorageResult<SqliteConnection> {
        let started = Instant::now();
        let conn = self.pool.get().map_err(|e| self.checkout_error(&e))?;
        debug!(waited = ?started.elapsed(), "connection checked out");
        Ok(SqliteConnection::new(conn))
    }

    /// Report utilisation without checking out a connection.
    ///
    /// Never blocks. A pool with every connection in use is still healthy;
    /// the message records the saturation.
    pub fn health_check(&self) -> PoolHealth {
        let state = self.pool.state();
        let healthy = state.connections > 0;
        let message = if !healthy {
            Some("pool has no open connections".to_string())
        } else if state.idle_connections == 0 && state.connections >= self.config.max_size {
            Some(format!("all {} connections in use", self.config.max_size))
        } else {
            None
        };

        PoolHealth {
            healthy,
            connections: state.connections,
            idle_connections: state.idle_connections,
            max_connections: self.config.max_size,
            message,
        }
    }

    // r2d2 reports every checkout failure as a timeout; a failed connect
    // shows up as its last error.
    fn checkout_error(&self, err: &r2d2::Error) -> StorageError {
        let detail = err.to_string();
        if detail.contains("timed out") && !detail.contains(':') {
            warn!(timeout = ?self.config.acquire_timeout, "no connection available");
            StorageError::Timeout(self.config.acquire_timeout.as_secs())
        } else {
            warn!(error = %detail, "connection checkout failed");
            StorageError::Connection(detail)
        }
    }
}
