//! Pool sizing and per-connection settings

use std::time::Duration;

/// Journal mode set on every pooled connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JournalMode {
    /// Write-ahead log; readers do not block the single writer.
    Wal,
    /// SQLite's rollback journal.
    Delete,
}

impl JournalMode {
    /// Value passed to `PRAGMA journal_mode`.
    pub fn as_pragma(self) -> &'static str {
        match self {
            Self::Wal => "WAL",
            Self::Delete => "DELETE",
        }
    }
}

/// Settings for [`SqlitePool`](super::SqlitePool).
#[derive(Debug, Clone)]
pub struct SqlitePoolConfig {
    pub max_size: u32,
    /// How long a request waits for a free connection.
    pub acquire_timeout: Duration,
    /// How long a statement waits on a locked database file.
    pub busy_timeout: Duration,
    pub journal_mode: JournalMode,
    pub foreign_keys: bool,
}

impl SqlitePoolConfig {
    /// Defaults with `max_size` connections, never fewer than one.
    pub fn with_max_size(max_size: u32) -> Self {
        Self { max_size: max_size.max(1), ..Self::default() }
    }
}

impl Default for SqlitePoolConfig {
    fn default() -> Self {
        Self {
            max_size: 5,
            acquire_timeout: Duration::from_secs(5),
            busy_timeout: Duration::from_secs(5),
            journal_mode: JournalMode::Wal,
            foreign_keys: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_entry_store_needs() {
        let config = SqlitePoolConfig::default();

        assert_eq!(config.max_size, 5);
        assert_eq!(config.journal_mode, JournalMode::Wal);
        assert!(config.foreign_keys);
        assert_eq!(config.busy_timeout, Duration::from_secs(5));
    }

    #[test]
    fn with_max_size_never_yields_empty_pool() {
        assert_eq!(SqlitePoolConfig::with_max_size(0).max_size, 1);
        assert_eq!(SqlitePoolConfig::with_max_size(8).max_size, 8);
    }

    #[test]
    fn journal_mode_pragma_values() {
        assert_eq!(JournalMode::Wal.as_pragma(), "WAL");
        assert_eq!(JournalMode::Delete.as_pragma(), "DELETE");
    }
}
