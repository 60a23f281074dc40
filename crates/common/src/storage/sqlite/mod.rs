//! Plain SQLite backend: r2d2 pool, connection wrapper and pragmas.

pub mod config;
pub mod connection;
pub mod pool;
pub mod pragmas;

pub use config::{JournalMode, SqlitePoolConfig};
pub use connection::SqliteConnection;
pub use pool::{PoolHealth, SqlitePool};
pub use pragmas::apply_connection_pragmas;
