//! Database implementations

pub mod entry_repository;
pub mod manager;

pub use entry_repository::SqliteEntryRepository;
pub use manager::DbManager;
