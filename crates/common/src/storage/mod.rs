//! Storage primitives for the SQLite entry store
//!
//! Provides the r2d2 SQLite pool used by the infrastructure layer together
//! with the storage error type it reports.

pub mod error;
pub mod sqlite;

// Re-export commonly used types
pub use error::{StorageError, StorageResult};
pub use sqlite::{
    apply_connection_pragmas, JournalMode, PoolHealth, SqliteConnection, SqlitePool,
    SqlitePoolConfig,
};
